//! Lamlet Parser Module
//!
//! Parses a single line into an expression tree by recursive descent.

mod ast;
mod expr_parser;

pub use ast::Expr;
pub use expr_parser::{parse_line, ExprParser};
