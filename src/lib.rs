//! # kScript
//!
//! kScript is a tiny interpreted scripting language with numeric and string
//! values, infix arithmetic, variable assignment, user-callable built-ins
//! and block-structured control flow (`if` / `elseif` / `else` / `while` /
//! `end`). Programs are compiled line by line into postfix and executed
//! over a value stack; a two-pass model pairs every block opener with its
//! `end` before the first line runs.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::{cell::RefCell, error::Error, io::Write, rc::Rc};

use crate::interpreter::script::core::ScriptModule;

/// Provides unified error types for compilation and execution.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating a script, split by phase, plus the wrapper that tags an
/// error with the compiled line it occurred on.
///
/// # Responsibilities
/// - Defines error enums for every failure mode (lexer, parser, block
///   resolver, evaluator).
/// - Renders the batch driver's two-line error reports.
pub mod error;

/// Orchestrates the entire process of script execution.
///
/// This module ties together the lexer, the shunting-yard parser, the block
/// resolver, the postfix evaluator and the per-program `ScriptModule` state
/// that the driver runs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, registries
///   and the script module.
/// - Provides the entry points for batch compilation and interactive
///   evaluation.
pub mod interpreter;

/// Shared byte buffer used to capture script output.
#[derive(Clone, Default)]
struct CaptureBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Compiles and executes a kScript program, returning everything it
/// printed.
///
/// This is the library-level counterpart of running `kscript <file>`: the
/// whole source is compiled first, then executed from the top. Output that
/// `print` produced before a runtime error is lost; the batch binary
/// streams to stdout instead.
///
/// # Errors
/// Returns the first compile or runtime error, tagged with its compiled
/// line number.
///
/// # Examples
/// ```
/// use kscript::run_script;
///
/// let output = run_script("print 2 + 2").unwrap();
/// assert_eq!(output, "4.000000\n");
///
/// // A compile error anywhere prevents execution entirely.
/// assert!(run_script("print 1\nx = (2").is_err());
/// ```
pub fn run_script(source: &str) -> Result<String, Box<dyn Error>> {
    let buffer = CaptureBuffer::default();
    let mut module = ScriptModule::new();
    module.set_output(Box::new(buffer.clone()));

    module.compile(source)?;
    module.execute()?;

    let bytes = buffer.bytes.borrow();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
