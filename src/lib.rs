//! # Lamlet - a line-oriented lambda calculus evaluator
//!
//! Lamlet evaluates the untyped lambda calculus extended with integer literals
//! and `let`-bindings. Every input line is parsed into an expression tree and
//! reduced to a value, which is printed. A line that fails to parse or to
//! evaluate is discarded and the next line is processed.
//!
//! ## Quick Start
//!
//! ```rust
//! use lamlet::{Evaluator, Parser, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse one line into an expression tree
//! let mut parser = Parser::new(r"(\f -> \x -> f x) (\y -> y) 9");
//! let expr = parser.parse()?;
//!
//! // Reduce it in a fresh environment
//! let evaluator = Evaluator::new();
//! let result = evaluator.evaluate(&expr)?;
//!
//! assert_eq!(result, Value::Num(9));
//! # Ok(())
//! # }
//! ```
//!
//! Functions are values and print in their lambda form:
//!
//! ```rust
//! # fn main() -> lamlet::Result<()> {
//! let identity = lamlet::evaluate_line(r"\x -> x")?;
//! assert_eq!(identity.to_string(), r"(\x -> x)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! ```text
//! expr       := atom+
//! atom       := NUMBER | "let" letbody | IDENT | "(" expr ")" | "\" lambdabody
//! letbody    := IDENT "=" expr "in" expr
//! lambdabody := IDENT "->" expr
//! ```
//!
//! - Juxtaposition is application and associates to the left: `a b c` is `(a b) c`
//! - Identifiers are ASCII letters only; `let` and `in` are reserved
//! - Numbers are unsigned decimal literals; there are no arithmetic operators
//!
//! ## Architecture
//!
//! ```text
//! Line → Parser (driving a Cursor) → Expr → Evaluator → Value
//! ```
//!
//! - [`Cursor`] - Position-tracking view over the line's characters
//! - [`Parser`] - Recursive-descent parser producing an [`Expr`]
//! - [`Evaluator`] - Reduces an [`Expr`] to a [`Value`]
//! - [`Environment`] - Persistent, shadowing chain of bindings
//! - [`driver`] - The line loop used by the `lamlet` binary
//!
//! ## Error Handling
//!
//! ```rust
//! use lamlet::{Error, ErrorPhase};
//!
//! let err = lamlet::evaluate_line("(3").unwrap_err();
//! assert_eq!(err.phase(), ErrorPhase::Parse);
//! assert_eq!(err.to_string(), "Expected ')' @2");
//!
//! let err = lamlet::evaluate_line("3 4").unwrap_err();
//! assert!(matches!(err, Error::NotApplicable { .. }));
//! ```
//!
//! ## License
//!
//! Licensed under the [MIT License](https://opensource.org/licenses/MIT).

/// Version of the Lamlet evaluator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use error::{Error, ErrorPhase, Result};
pub use lexer::Cursor;
pub use parser::{parse_line, Expr, ExprParser};
pub use runtime::{Binding, Capture, Closure, Environment, EvalConfig, Evaluator, Strategy, Value};

/// Type alias for the expression parser.
/// Converts one line of source text into an expression tree.
pub type Parser = ExprParser;

/// Parses and evaluates a single line with the default configuration
pub fn evaluate_line(source: &str) -> Result<Value> {
    let expr = parse_line(source)?;
    Evaluator::new().evaluate(&expr)
}
