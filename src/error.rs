//! Error types for the Lamlet evaluator

use thiserror::Error;

/// Lamlet errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Parse errors
    /// Syntax error encountered while parsing a line
    ///
    /// **Triggered by:** malformed `let` or lambda, missing `)`, empty expression
    /// **Example:** `(3` (missing closing bracket)
    ///
    /// The display form `<message> @<position>` is the diagnostic line written
    /// for a rejected line.
    #[error("{message} @{position}")]
    Syntax {
        /// Error description
        message: String,
        /// 0-based character offset into the line
        position: usize,
    },

    // Evaluation errors
    /// Reference to a name with no binding in scope
    ///
    /// **Triggered by:** using a name outside any `let` or lambda that binds it
    /// **Example:** `y` on its own
    #[error("Variable not found: '{name}'")]
    UnboundVariable {
        /// Variable name
        name: String,
    },

    /// Application of something that is not a function
    ///
    /// **Triggered by:** putting a number in function position
    /// **Example:** `3 4`
    #[error("Cannot apply non-function value {value}")]
    NotApplicable {
        /// Printed form of the value in function position
        value: String,
    },

    /// Application of a closure that never captured its environment
    #[error("No environment captured for closure over '{param}'")]
    NoEnvironment {
        /// Parameter name of the closure
        param: String,
    },
}

/// Which stage of line processing produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    /// The line was rejected before evaluation started
    Parse,
    /// The line parsed but could not be reduced
    Eval,
}

impl Error {
    /// Create a syntax error at the given position
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        Error::Syntax {
            message: message.into(),
            position,
        }
    }

    /// Classify the error by processing stage
    pub fn phase(&self) -> ErrorPhase {
        match self {
            Error::Syntax { .. } => ErrorPhase::Parse,
            Error::UnboundVariable { .. } | Error::NotApplicable { .. } | Error::NoEnvironment { .. } => {
                ErrorPhase::Eval
            }
        }
    }

    /// Position of a syntax error, if this is one
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type for Lamlet operations
pub type Result<T> = std::result::Result<T, Error>;
