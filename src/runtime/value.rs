use std::fmt;
use std::rc::Rc;

use crate::parser::Expr;
use crate::runtime::Environment;

/// Runtime value representation
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit integer value
    Num(i64),
    /// Lambda function value
    Closure(Closure),
}

/// Whether a closure has taken its environment snapshot yet
#[derive(Debug, Clone, Default)]
pub enum Capture {
    /// No snapshot; applying the closure is an error
    #[default]
    Uncaptured,
    /// Environment visible where the lambda was reduced
    Captured(Environment),
}

/// Lambda abstraction paired with its capture state
#[derive(Debug, Clone)]
pub struct Closure {
    /// Parameter name
    pub param: Rc<str>,
    /// Function body, shared with the expression tree it came from
    pub body: Rc<Expr>,
    /// Environment snapshot
    pub capture: Capture,
}

impl Closure {
    /// Creates a closure that has not captured an environment
    pub fn uncaptured(param: Rc<str>, body: Rc<Expr>) -> Self {
        Closure {
            param,
            body,
            capture: Capture::Uncaptured,
        }
    }

    /// Creates a closure over `env`
    pub fn captured(param: Rc<str>, body: Rc<Expr>, env: Environment) -> Self {
        Closure {
            param,
            body,
            capture: Capture::Captured(env),
        }
    }

    /// Moves to the captured state, replacing any earlier snapshot
    pub fn capture(self, env: Environment) -> Self {
        Closure {
            capture: Capture::Captured(env),
            ..self
        }
    }

    /// Captured environment, if any
    pub fn environment(&self) -> Option<&Environment> {
        match &self.capture {
            Capture::Captured(env) => Some(env),
            Capture::Uncaptured => None,
        }
    }

    /// Checks if the closure has captured an environment
    pub fn is_captured(&self) -> bool {
        matches!(self.capture, Capture::Captured(_))
    }
}

impl Value {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "num",
            Value::Closure(_) => "function",
        }
    }

    /// Closure payload, if this is a function
    pub fn as_closure(&self) -> Option<&Closure> {
        match self {
            Value::Closure(closure) => Some(closure),
            Value::Num(_) => None,
        }
    }
}

impl PartialEq for Value {
    /// Closures compare by code only: same parameter and same body.
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => {
                a.param == b.param && (Rc::ptr_eq(&a.body, &b.body) || a.body == b.body)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", n),
            Value::Closure(closure) => write!(f, "(\\{} -> {})", closure.param, closure.body),
        }
    }
}
