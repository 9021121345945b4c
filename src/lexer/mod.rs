//! Lexical layer for Lamlet
//!
//! There is no token stream: the parser drives a [`Cursor`] directly and asks
//! it to classify and consume characters as it goes.

mod cursor;

pub use cursor::{is_digit, is_name_char, is_space, Cursor, KEYWORD_IN, KEYWORD_LET};
