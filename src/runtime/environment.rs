use std::fmt;
use std::rc::Rc;

use crate::parser::Expr;
use crate::runtime::Value;

/// What a name is bound to
#[derive(Debug, Clone)]
pub enum Binding {
    /// Unreduced expression together with the environment it was bound in
    Thunk {
        /// Bound expression
        expr: Rc<Expr>,
        /// Environment the expression is reduced in at every reference
        env: Environment,
    },
    /// Already-reduced value
    Value(Value),
}

/// Persistent environment of name bindings
///
/// Each [`Environment::bind`] returns a new environment that shares every
/// older binding with its parent, so cloning is cheap and a captured
/// snapshot can never observe bindings added after it was taken.
#[derive(Clone, Default)]
pub struct Environment {
    head: Option<Rc<Frame>>,
}

/// Single binding in the chain
struct Frame {
    name: Rc<str>,
    binding: Binding,
    parent: Option<Rc<Frame>>,
}

impl Environment {
    /// Creates an empty environment
    pub fn new() -> Self {
        Environment { head: None }
    }

    /// Returns a new environment with `name` bound in front of all existing bindings
    pub fn bind(&self, name: Rc<str>, binding: Binding) -> Environment {
        Environment {
            head: Some(Rc::new(Frame {
                name,
                binding,
                parent: self.head.clone(),
            })),
        }
    }

    /// Finds the most recent binding for `name`
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.frames()
            .find(|frame| &*frame.name == name)
            .map(|frame| &frame.binding)
    }

    /// Checks if `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of bindings, shadowed ones included
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Bound names, most recent first, shadowed ones included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames().map(|frame| &*frame.name)
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.head.as_deref(), |frame| frame.parent.as_deref())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // bindings can nest environments, so only names are shown
        f.debug_list().entries(self.names()).finish()
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        // unlink uniquely owned frames iteratively so long chains
        // do not recurse once per frame
        let mut next = self.head.take();
        while let Some(frame) = next {
            match Rc::try_unwrap(frame) {
                Ok(mut frame) => next = frame.parent.take(),
                Err(_) => break,
            }
        }
    }
}
