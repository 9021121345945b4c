use std::cell::Cell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::parser::Expr;
use crate::runtime::{Binding, Closure, Environment, Value};

/// How `let` and application bind their right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Bind the unreduced expression and reduce it again at every reference
    ///
    /// Every reference repeats the work of the bound expression, so nested
    /// bindings that reference each other cost exponential time.
    CallByName,
    /// Bind the reduced value
    #[default]
    CallByValue,
}

/// Evaluator configuration
#[derive(Debug, Clone, Default)]
pub struct EvalConfig {
    /// Binding discipline for `let` and application
    pub strategy: Strategy,
}

/// Reduces expression trees to values
///
/// One case per expression variant:
/// - `Num` reduces to itself
/// - `Var` looks the name up; a thunk is reduced in the environment it was bound in
/// - `Apply` reduces the function position and applies the resulting closure
/// - `Let` forces the bound expression, binds it, then reduces the body
/// - `Lambda` captures the current environment into a closure
///
/// Before binding, the right-hand side of a `let` or an application is always
/// reduced once in its own environment. A failure there fails the whole
/// construct, even if the name is never referenced.
pub struct Evaluator {
    config: EvalConfig,
    /// Number of reduction steps since creation or the last reset
    steps: Cell<u64>,
}

impl Evaluator {
    /// Creates an evaluator with the default configuration
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    /// Creates an evaluator with an explicit configuration
    pub fn with_config(config: EvalConfig) -> Self {
        Evaluator {
            config,
            steps: Cell::new(0),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Reduction steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps.get()
    }

    /// Resets the step counter
    pub fn reset_steps(&self) {
        self.steps.set(0);
    }

    /// Reduces a whole line in a fresh, empty environment
    pub fn evaluate(&self, expr: &Rc<Expr>) -> Result<Value> {
        self.reduce(expr, &Environment::new())
    }

    /// Reduces `expr` in `env`
    pub fn reduce(&self, expr: &Rc<Expr>, env: &Environment) -> Result<Value> {
        self.steps.set(self.steps.get() + 1);
        tracing::trace!(kind = expr.kind(), depth = env.depth(), "reduce");

        match expr.as_ref() {
            Expr::Num(n) => Ok(Value::Num(*n)),

            Expr::Var(name) => self.lookup(name, env),

            Expr::Apply { func, arg } => match self.reduce(func, env)? {
                Value::Closure(closure) => self.apply(&closure, arg, env),
                other => {
                    tracing::debug!(kind = other.type_name(), "value in function position");
                    Err(Error::NotApplicable {
                        value: other.to_string(),
                    })
                }
            },

            Expr::Let { name, bound, body } => {
                let binding = self.bind(bound, env)?;
                self.reduce(body, &env.bind(name.clone(), binding))
            }

            Expr::Lambda { param, body } => Ok(Value::Closure(Closure::captured(
                param.clone(),
                body.clone(),
                env.clone(),
            ))),
        }
    }

    /// Applies `closure` to the unreduced argument `arg`
    ///
    /// The argument is forced in `caller_env`; the body runs in the closure's
    /// captured environment extended with the parameter.
    pub fn apply(&self, closure: &Closure, arg: &Rc<Expr>, caller_env: &Environment) -> Result<Value> {
        let captured = closure.environment().ok_or_else(|| Error::NoEnvironment {
            param: closure.param.to_string(),
        })?;

        let binding = self.bind(arg, caller_env)?;
        self.reduce(&closure.body, &captured.bind(closure.param.clone(), binding))
    }

    fn bind(&self, expr: &Rc<Expr>, env: &Environment) -> Result<Binding> {
        let forced = self.reduce(expr, env)?;

        let binding = match self.config.strategy {
            Strategy::CallByName => Binding::Thunk {
                expr: expr.clone(),
                env: env.clone(),
            },
            Strategy::CallByValue => Binding::Value(forced),
        };
        tracing::debug!(strategy = ?self.config.strategy, kind = expr.kind(), "bind");

        Ok(binding)
    }

    fn lookup(&self, name: &str, env: &Environment) -> Result<Value> {
        match env.lookup(name) {
            Some(Binding::Value(value)) => Ok(value.clone()),
            Some(Binding::Thunk { expr, env: defined_in }) => self.reduce(expr, defined_in),
            None => Err(Error::UnboundVariable {
                name: name.to_string(),
            }),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    fn eval_with(strategy: Strategy, source: &str) -> Result<Value> {
        let expr = parse_line(source).unwrap();
        Evaluator::with_config(EvalConfig { strategy }).evaluate(&expr)
    }

    fn eval(source: &str) -> Result<Value> {
        eval_with(Strategy::CallByName, source)
    }

    /// `let a = \y -> y in let b = a a in let c = b b in ... <last> 7`
    fn chained_let(levels: usize) -> String {
        let names: Vec<char> = ('a'..='z').take(levels).collect();
        let mut source = format!("let {} = \\y -> y in ", names[0]);
        for pair in names.windows(2) {
            source.push_str(&format!("let {} = {} {} in ", pair[1], pair[0], pair[0]));
        }
        source.push_str(&format!("{} 7", names[levels - 1]));
        source
    }

    #[test]
    fn test_num_reduces_to_itself() {
        assert_eq!(eval("3").unwrap(), Value::Num(3));
    }

    #[test]
    fn test_lambda_reduces_to_captured_closure() {
        let value = eval("\\x -> x").unwrap();
        assert_eq!(value.to_string(), "(\\x -> x)");
        assert!(value.as_closure().is_some_and(Closure::is_captured));
    }

    #[test]
    fn test_let_and_application() {
        assert_eq!(eval("let x = 5 in x").unwrap(), Value::Num(5));
        assert_eq!(eval("(\\x -> x) 7").unwrap(), Value::Num(7));
        assert_eq!(eval("(\\f -> \\x -> f x) (\\y -> y) 9").unwrap(), Value::Num(9));
    }

    #[test]
    fn test_shadowing() {
        assert_eq!(eval("let x = 1 in let x = 2 in x").unwrap(), Value::Num(2));
        assert_eq!(eval("(\\x -> \\x -> x) 1 2").unwrap(), Value::Num(2));
    }

    #[test]
    fn test_unbound_variable() {
        assert_eq!(
            eval("y").unwrap_err(),
            Error::UnboundVariable {
                name: "y".to_string()
            }
        );
    }

    #[test]
    fn test_not_applicable() {
        assert_eq!(
            eval("3 4").unwrap_err(),
            Error::NotApplicable {
                value: "3".to_string()
            }
        );
    }

    #[test]
    fn test_forcing_failure_fails_let_even_if_unused() {
        assert!(matches!(
            eval("let x = nope in 1"),
            Err(Error::UnboundVariable { .. })
        ));
        assert!(matches!(
            eval("(\\x -> 1) (2 3)"),
            Err(Error::NotApplicable { .. })
        ));
    }

    #[test]
    fn test_apply_uncaptured_closure_fails() {
        let evaluator = Evaluator::new();
        let closure = Closure::uncaptured("x".into(), Expr::var("x"));
        let arg = Rc::new(Expr::Num(1));

        assert_eq!(
            evaluator.apply(&closure, &arg, &Environment::new()).unwrap_err(),
            Error::NoEnvironment {
                param: "x".to_string()
            }
        );

        let closure = closure.capture(Environment::new());
        assert_eq!(
            evaluator.apply(&closure, &arg, &Environment::new()).unwrap(),
            Value::Num(1)
        );
    }

    #[test]
    fn test_let_bound_lambda_cannot_see_itself() {
        assert!(matches!(
            eval("let f = \\x -> f x in f 1"),
            Err(Error::UnboundVariable { name }) if name == "f"
        ));
    }

    #[test]
    fn test_thunk_uses_defining_environment() {
        // `y` inside the bound expression refers to the outer y, not the
        // closer one in scope at the reference
        let source = "let y = 1 in let x = y in let y = 2 in x";
        assert_eq!(eval_with(Strategy::CallByName, source).unwrap(), Value::Num(1));
        assert_eq!(eval_with(Strategy::CallByValue, source).unwrap(), Value::Num(1));
    }

    #[test]
    fn test_closure_sees_environment_at_capture() {
        let source = "let a = 1 in let f = \\z -> a in let a = 2 in f 0";
        assert_eq!(eval(source).unwrap(), Value::Num(1));
    }

    #[test]
    fn test_call_by_name_reduces_references_again() {
        let source = "let k = \\a -> \\b -> a in let x = k 1 2 in k x x";

        let by_name = Evaluator::with_config(EvalConfig {
            strategy: Strategy::CallByName,
        });
        let by_value = Evaluator::with_config(EvalConfig {
            strategy: Strategy::CallByValue,
        });
        let expr = parse_line(source).unwrap();

        assert_eq!(by_name.evaluate(&expr).unwrap(), Value::Num(1));
        assert_eq!(by_value.evaluate(&expr).unwrap(), Value::Num(1));
        assert!(by_name.steps() > by_value.steps());
    }

    #[test]
    fn test_default_strategy_is_linear_on_chained_lets() {
        let expr = parse_line(&chained_let(20)).unwrap();
        let evaluator = Evaluator::new();

        assert_eq!(evaluator.config().strategy, Strategy::CallByValue);
        assert_eq!(evaluator.evaluate(&expr).unwrap(), Value::Num(7));
        assert!(evaluator.steps() < 200, "took {} steps", evaluator.steps());
    }

    #[test]
    fn test_call_by_name_repeats_work_on_chained_lets() {
        let expr = parse_line(&chained_let(6)).unwrap();
        let by_name = Evaluator::with_config(EvalConfig {
            strategy: Strategy::CallByName,
        });
        let by_value = Evaluator::new();

        assert_eq!(by_name.evaluate(&expr).unwrap(), Value::Num(7));
        assert_eq!(by_value.evaluate(&expr).unwrap(), Value::Num(7));
        assert!(by_name.steps() > 10 * by_value.steps());
    }

    #[derive(Clone, Default)]
    struct SharedBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_binding_logged_at_debug_level() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            eval_with(Strategy::CallByValue, "let x = 1 in x").unwrap();
        });

        let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("DEBUG"));
        assert!(logged.contains("bind"));
        assert!(!logged.contains("reduce"));
    }

    #[test]
    fn test_step_counter_reset() {
        let evaluator = Evaluator::new();
        evaluator.evaluate(&parse_line("let x = 5 in x").unwrap()).unwrap();
        assert!(evaluator.steps() > 0);
        evaluator.reset_steps();
        assert_eq!(evaluator.steps(), 0);
    }
}
