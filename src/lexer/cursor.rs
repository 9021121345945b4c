/// Reserved word introducing a binding
pub const KEYWORD_LET: &str = "let";

/// Reserved word separating a `let` binding from its body
pub const KEYWORD_IN: &str = "in";

/// ASCII decimal digit
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Identifiers are made of ASCII letters only
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Characters skipped after every token-level match
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Position-tracking view over a single line of source text
///
/// Positions are 0-based character offsets. Whitespace is skipped *after* a
/// successful match, never before, so a fresh cursor does not skip leading
/// whitespace on its own.
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Source line as character vector
    source: Vec<char>,
    /// Current position in source
    current: usize,
}

impl Cursor {
    /// Creates a cursor at the start of `source`
    pub fn new(source: &str) -> Self {
        Cursor {
            source: source.chars().collect(),
            current: 0,
        }
    }

    /// Current character offset
    pub fn position(&self) -> usize {
        self.current
    }

    /// True when every character has been consumed
    pub fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Current character, or `'\0'` past the end
    pub fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    /// Consumes `expected` and any whitespace after it
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            return false;
        }
        self.current += 1;
        self.skip_space();
        true
    }

    /// Consumes the literal `expected` and any whitespace after it
    pub fn match_str(&mut self, expected: &str) -> bool {
        if !self.starts_with(expected) {
            return false;
        }
        self.current += expected.chars().count();
        self.skip_space();
        true
    }

    /// True if `word` appears at the cursor as a whole word
    ///
    /// A name character right after the word disqualifies the match, so
    /// `letter` is not the keyword `let`. Nothing is consumed.
    pub fn check_keyword(&self, word: &str) -> bool {
        if !self.starts_with(word) {
            return false;
        }
        let after = self.current + word.chars().count();
        !self.source.get(after).copied().is_some_and(is_name_char)
    }

    /// Consumes `word` and trailing whitespace if [`Self::check_keyword`] holds
    pub fn match_keyword(&mut self, word: &str) -> bool {
        if !self.check_keyword(word) {
            return false;
        }
        self.current += word.chars().count();
        self.skip_space();
        true
    }

    /// Consumes the longest run of characters satisfying `pred`
    ///
    /// Trailing whitespace is left for the caller.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.current;
        while !self.is_at_end() && pred(self.source[self.current]) {
            self.current += 1;
        }
        self.source[start..self.current].iter().collect()
    }

    /// Skips spaces, tabs, carriage returns and newlines
    pub fn skip_space(&mut self) {
        while !self.is_at_end() && is_space(self.source[self.current]) {
            self.current += 1;
        }
    }

    /// Text from the cursor to the end of the line
    pub fn rest(&self) -> String {
        self.source[self.current.min(self.source.len())..]
            .iter()
            .collect()
    }

    fn starts_with(&self, expected: &str) -> bool {
        let mut offset = self.current;
        for c in expected.chars() {
            if self.source.get(offset) != Some(&c) {
                return false;
            }
            offset += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(is_digit('0') && is_digit('9'));
        assert!(!is_digit('a'));
        assert!(is_name_char('a') && is_name_char('Z'));
        assert!(!is_name_char('_'));
        assert!(!is_name_char('1'));
        assert!(!is_name_char('é'));
        assert!(is_space('\t') && is_space('\r'));
    }

    #[test]
    fn test_leading_whitespace_not_skipped() {
        let cursor = Cursor::new("  x");
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.peek(), ' ');
    }

    #[test]
    fn test_match_char_skips_trailing_space() {
        let mut cursor = Cursor::new("(  x");
        assert!(cursor.match_char('('));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.peek(), 'x');
        assert!(!cursor.match_char(')'));
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_match_str_at_end_of_line() {
        let mut cursor = Cursor::new("->");
        assert!(cursor.match_str("->"));
        assert!(cursor.is_at_end());

        let mut cursor = Cursor::new("-");
        assert!(!cursor.match_str("->"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_keyword_boundary() {
        let cursor = Cursor::new("letter");
        assert!(!cursor.check_keyword(KEYWORD_LET));

        let cursor = Cursor::new("let x");
        assert!(cursor.check_keyword(KEYWORD_LET));

        let cursor = Cursor::new("in");
        assert!(cursor.check_keyword(KEYWORD_IN));

        let cursor = Cursor::new("in(");
        assert!(cursor.check_keyword(KEYWORD_IN));
    }

    #[test]
    fn test_match_keyword_consumes_word_and_space() {
        let mut cursor = Cursor::new("let  x");
        assert!(cursor.match_keyword(KEYWORD_LET));
        assert_eq!(cursor.position(), 5);

        let mut cursor = Cursor::new("inner");
        assert!(!cursor.match_keyword(KEYWORD_IN));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_take_while_leaves_whitespace() {
        let mut cursor = Cursor::new("abc 12");
        assert_eq!(cursor.take_while(is_name_char), "abc");
        assert_eq!(cursor.peek(), ' ');
        cursor.skip_space();
        assert_eq!(cursor.take_while(is_digit), "12");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), '\0');
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let mut cursor = Cursor::new("λλ x");
        assert_eq!(cursor.take_while(|c| c == 'λ'), "λλ");
        cursor.skip_space();
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.rest(), "x");
    }
}
