use std::rc::Rc;

use super::ast::Expr;
use crate::error::{Error, Result};
use crate::lexer::{is_digit, is_name_char, Cursor, KEYWORD_IN, KEYWORD_LET};

/// Recursive-descent parser for one line of Lamlet
///
/// Grammar (juxtaposition is application, left-associated):
///
/// ```text
/// expr       := atom+
/// atom       := NUMBER | "let" letbody | IDENT | "(" expr ")" | "\" lambdabody
/// letbody    := IDENT "=" expr "in" expr
/// lambdabody := IDENT "->" expr
/// ```
pub struct ExprParser {
    cursor: Cursor,
}

impl ExprParser {
    /// Creates a parser over a single line
    pub fn new(source: &str) -> Self {
        ExprParser {
            cursor: Cursor::new(source),
        }
    }

    /// Parses the line into an expression tree
    ///
    /// Parsing stops at the first character that cannot start an atom; what
    /// follows it is left unconsumed.
    pub fn parse(&mut self) -> Result<Rc<Expr>> {
        let expr = self.parse_expr()?;

        if !self.cursor.is_at_end() {
            tracing::debug!(
                position = self.cursor.position(),
                rest = %self.cursor.rest(),
                "ignoring trailing input"
            );
        }

        Ok(expr)
    }

    /// Current character offset into the line
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Parse a juxtaposition of atoms into left-nested applications
    fn parse_expr(&mut self) -> Result<Rc<Expr>> {
        let mut expr: Option<Rc<Expr>> = None;

        while !self.cursor.is_at_end() {
            let Some(atom) = self.parse_atom()? else {
                break;
            };
            expr = Some(match expr {
                Some(func) => Expr::apply(func, atom),
                None => atom,
            });
        }

        expr.ok_or_else(|| self.fail("Expected expression"))
    }

    /// Parse one atom, or `None` if the cursor does not start one
    fn parse_atom(&mut self) -> Result<Option<Rc<Expr>>> {
        let c = self.cursor.peek();

        let atom = if is_digit(c) {
            self.parse_num()?
        } else if is_name_char(c) {
            if self.cursor.match_keyword(KEYWORD_LET) {
                self.parse_let()?
            } else if self.cursor.check_keyword(KEYWORD_IN) {
                // left in place for the enclosing let
                return Ok(None);
            } else {
                Rc::new(Expr::Var(self.parse_name().into()))
            }
        } else if self.cursor.match_char('(') {
            self.parse_bracket()?
        } else if self.cursor.match_char('\\') {
            self.parse_lambda()?
        } else {
            return Ok(None);
        };

        Ok(Some(atom))
    }

    fn parse_num(&mut self) -> Result<Rc<Expr>> {
        let start = self.cursor.position();
        let digits = self.cursor.take_while(is_digit);
        let value: i64 = digits
            .parse()
            .map_err(|_| Error::syntax("Number literal out of range", start))?;
        self.cursor.skip_space();

        Ok(Rc::new(Expr::Num(value)))
    }

    fn parse_name(&mut self) -> String {
        let name = self.cursor.take_while(is_name_char);
        self.cursor.skip_space();
        name
    }

    fn parse_bracket(&mut self) -> Result<Rc<Expr>> {
        let inner = self.parse_expr()?;
        if !self.cursor.match_char(')') {
            return Err(self.fail("Expected ')'"));
        }
        Ok(inner)
    }

    fn parse_let(&mut self) -> Result<Rc<Expr>> {
        if !is_name_char(self.cursor.peek()) {
            return Err(self.fail("Let expected identifier"));
        }
        let name = self.parse_name();

        if !self.cursor.match_char('=') {
            return Err(self.fail("Let expected '='"));
        }
        let bound = self.parse_expr()?;

        if !self.cursor.match_keyword(KEYWORD_IN) {
            return Err(self.fail("Let expected in"));
        }
        let body = self.parse_expr()?;

        Ok(Expr::let_in(&name, bound, body))
    }

    fn parse_lambda(&mut self) -> Result<Rc<Expr>> {
        if !is_name_char(self.cursor.peek()) {
            return Err(self.fail("Lambda expected identifier"));
        }
        let param = self.parse_name();

        if !self.cursor.match_str("->") {
            return Err(self.fail("Lambda expected ->"));
        }
        let body = self.parse_expr()?;

        Ok(Expr::lambda(&param, body))
    }

    fn fail(&self, message: &str) -> Error {
        Error::syntax(message, self.cursor.position())
    }
}

/// Parses a complete line
pub fn parse_line(source: &str) -> Result<Rc<Expr>> {
    ExprParser::new(source).parse()
}
