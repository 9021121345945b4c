use std::fmt;
use std::rc::Rc;

/// Expression tree for one line
///
/// Children are reference-counted because closures and call-by-name bindings
/// keep pointing at sub-trees after the line's own tree is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal
    Num(i64),

    /// Reference to a bound name
    Var(Rc<str>),

    /// Function application: `func arg`
    Apply {
        /// Expression in function position
        func: Rc<Expr>,
        /// Argument expression, left unreduced until application
        arg: Rc<Expr>,
    },

    /// Let binding: `let name = bound in body`
    Let {
        /// Name introduced for `body`
        name: Rc<str>,
        /// Bound expression
        bound: Rc<Expr>,
        /// Scope of the binding
        body: Rc<Expr>,
    },

    /// Lambda abstraction: `\param -> body`
    Lambda {
        /// Parameter name
        param: Rc<str>,
        /// Function body
        body: Rc<Expr>,
    },
}

impl Expr {
    /// Builds a variable reference
    pub fn var(name: &str) -> Rc<Expr> {
        Rc::new(Expr::Var(Rc::from(name)))
    }

    /// Builds an application node
    pub fn apply(func: Rc<Expr>, arg: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Apply { func, arg })
    }

    /// Builds a let node
    pub fn let_in(name: &str, bound: Rc<Expr>, body: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Let {
            name: Rc::from(name),
            bound,
            body,
        })
    }

    /// Builds a lambda node
    pub fn lambda(param: &str, body: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Lambda {
            param: Rc::from(param),
            body,
        })
    }

    /// Returns the variant name, used in trace output
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Num(_) => "num",
            Expr::Var(_) => "var",
            Expr::Apply { .. } => "apply",
            Expr::Let { .. } => "let",
            Expr::Lambda { .. } => "lambda",
        }
    }
}

impl fmt::Display for Expr {
    /// Fully bracketed form; every compound node carries its own parentheses
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Apply { func, arg } => write!(f, "({} {})", func, arg),
            Expr::Let { name, bound, body } => {
                write!(f, "(let {} = {} in {})", name, bound, body)
            }
            Expr::Lambda { param, body } => write!(f, "(\\{} -> {})", param, body),
        }
    }
}
