/// Compile-time errors.
///
/// Defines all error types that can occur while lexing a source line,
/// reordering it into postfix, or resolving block structure. Parse errors
/// abort the compile pass and prevent execution.
pub mod parse_error;
/// Run-time errors.
///
/// Contains all error types that can be raised while a compiled line is
/// evaluated: stack discipline violations, operand kind mismatches, and
/// arithmetic failures such as division by zero.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Pairs an error with the 1-based number of the compiled line it occurred
/// on.
///
/// Line numbers count compiled lines: blank source lines are skipped before
/// compilation and do not shift the numbering seen in reports.
#[derive(Debug)]
pub struct LineError<E> {
    /// The 1-based compiled-line number.
    pub line:  usize,
    /// The underlying error.
    pub error: E,
}

impl std::fmt::Display for LineError<ParseError> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error on line {}\n{}", self.line, self.error)
    }
}

impl std::fmt::Display for LineError<RuntimeError> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Runtime error on line {}\n{}", self.line, self.error)
    }
}

impl std::error::Error for LineError<ParseError> {}
impl std::error::Error for LineError<RuntimeError> {}
