//! Runtime for Lamlet: environments, values and the evaluator

mod environment;
mod evaluator;
mod value;

pub use environment::{Binding, Environment};
pub use evaluator::{EvalConfig, Evaluator, Strategy};
pub use value::{Capture, Closure, Value};
