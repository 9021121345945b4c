//! `lamlet` - evaluates one lambda-calculus expression per input line
//!
//! Usage: `lamlet < program.txt`
//!
//! Results go to stdout, diagnostics to stderr. Set `RUST_LOG` (for example
//! `RUST_LOG=lamlet=trace`) to see evaluator tracing on stderr.

use std::io;

use anyhow::{Context, Result};
use lamlet::{driver, Evaluator};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();

    let evaluator = Evaluator::new();
    let summary = driver::run(
        &evaluator,
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
    )
    .context("failed to process input")?;

    tracing::debug!(
        lines = summary.lines,
        values = summary.values,
        eval_failures = summary.eval_failures,
        parse_failures = summary.parse_failures,
        "input exhausted"
    );

    Ok(())
}
