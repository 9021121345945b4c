//! Line loop: feeds input lines to the parser and evaluator
//!
//! Output protocol, one line of input at a time:
//! - a value is printed on the output stream in its printed form
//! - an evaluation failure prints `error` on the output stream and the
//!   message on the diagnostic stream
//! - a parse failure prints `<message> @<position>` on the diagnostic
//!   stream and nothing on the output stream

use std::io::{self, BufRead, Write};

use crate::error::{Error, ErrorPhase};
use crate::parser::parse_line;
use crate::runtime::{Evaluator, Value};

/// Result of processing one line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The line reduced to a value
    Value(Value),
    /// The line parsed but failed to reduce
    EvalFailed(Error),
    /// The line was rejected by the parser
    ParseFailed(Error),
}

/// Counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read
    pub lines: usize,
    /// Lines that produced a value
    pub values: usize,
    /// Lines that failed during evaluation
    pub eval_failures: usize,
    /// Lines rejected by the parser
    pub parse_failures: usize,
}

/// Parses and evaluates one line in a fresh environment
pub fn process_line(evaluator: &Evaluator, line: &str) -> LineOutcome {
    let expr = match parse_line(line) {
        Ok(expr) => expr,
        Err(err) => return LineOutcome::ParseFailed(err),
    };

    match evaluator.evaluate(&expr) {
        Ok(value) => LineOutcome::Value(value),
        Err(err) => match err.phase() {
            ErrorPhase::Eval => LineOutcome::EvalFailed(err),
            ErrorPhase::Parse => LineOutcome::ParseFailed(err),
        },
    }
}

/// Processes every line of `input`, writing results to `out` and diagnostics to `diag`
///
/// Lines are split on `\n` and decoded lossily, so invalid UTF-8 cannot stop
/// the loop. Only I/O errors end the run early.
pub fn run<R, W, E>(evaluator: &Evaluator, mut input: R, mut out: W, mut diag: E) -> io::Result<RunSummary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = RunSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        let line = String::from_utf8_lossy(&buf);
        summary.lines += 1;

        let outcome = process_line(evaluator, &line);
        tracing::debug!(line = summary.lines, outcome = ?outcome, "processed line");

        match outcome {
            LineOutcome::Value(value) => {
                summary.values += 1;
                writeln!(out, "{}", value)?;
            }
            LineOutcome::EvalFailed(err) => {
                summary.eval_failures += 1;
                writeln!(diag, "{}", err)?;
                writeln!(out, "error")?;
            }
            LineOutcome::ParseFailed(err) => {
                summary.parse_failures += 1;
                writeln!(diag, "{}", err)?;
            }
        }
    }

    out.flush()?;
    diag.flush()?;
    Ok(summary)
}
