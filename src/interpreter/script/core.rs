use std::{
    collections::HashMap,
    io::{self, Write},
    rc::Rc,
};

use crate::{
    error::{LineError, ParseError, RuntimeError},
    interpreter::{
        evaluator,
        parser,
        script::blocks::{EndBinding, NestEntry},
        token::Token,
        value::Value,
    },
};

/// One compiled source line: its postfix token list.
///
/// Token lists are shared so the execute loop can evaluate a line while
/// the module itself is borrowed mutably for variable and counter updates.
pub struct ScriptLine {
    /// The line's postfix tokens.
    pub tokens: Rc<Vec<Token>>,
}

/// Per-program interpreter state.
///
/// One module owns everything a running program touches: the compiled
/// lines, the variable store, the block-structure maps built at compile
/// time, the if-result stack and program counter used at run time, and the
/// output sink `print` writes to. The operator and function registries are
/// immutable statics and live outside the module.
pub struct ScriptModule {
    pub(crate) compiled:     Vec<ScriptLine>,
    pub(crate) variables:    HashMap<String, Value>,
    pub(crate) nest_stack:   Vec<NestEntry>,
    pub(crate) begin_to_end: HashMap<usize, usize>,
    pub(crate) end_to_begin: HashMap<usize, EndBinding>,
    pub(crate) if_results:   Vec<bool>,
    pub(crate) pc:           usize,
    pub(crate) jump:         Option<usize>,
    pub(crate) interactive:  bool,
    out:                     Box<dyn Write>,
}

#[allow(clippy::new_without_default)]
impl ScriptModule {
    /// Creates a module for batch execution, printing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(false)
    }

    /// Creates a module for the interactive prompt, printing to stdout.
    ///
    /// Interactive modules reject block statements at parse time: a single
    /// input line carries no file context to resolve them against.
    #[must_use]
    pub fn interactive() -> Self {
        Self::with_mode(true)
    }

    fn with_mode(interactive: bool) -> Self {
        Self { compiled: Vec::new(),
               variables: HashMap::new(),
               nest_stack: Vec::new(),
               begin_to_end: HashMap::new(),
               end_to_begin: HashMap::new(),
               if_results: Vec::new(),
               pc: 0,
               jump: None,
               interactive,
               out: Box::new(io::stdout()) }
    }

    /// Redirects `print` output, e.g. into a capture buffer for tests.
    pub fn set_output(&mut self, out: Box<dyn Write>) {
        self.out = out;
    }

    /// Writes a value and a newline to the output sink and flushes.
    pub(crate) fn print_value(&mut self, value: &Value) {
        let _ = writeln!(self.out, "{value}");
        let _ = self.out.flush();
    }

    /// Reads a variable's current value.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Compiles a whole source into postfix lines.
    ///
    /// Blank lines are skipped and do not occupy a compiled-line slot.
    /// Block statements are paired with their `end` as lines are parsed;
    /// after the last line the nest stack must be empty.
    ///
    /// # Errors
    /// The first [`ParseError`] aborts the pass, tagged with its 1-based
    /// compiled-line number. An unclosed block is reported against the
    /// line that opened it.
    pub fn compile(&mut self, source: &str) -> Result<(), LineError<ParseError>> {
        for line in source.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parser::parse_line(self, line) {
                Ok(tokens) => self.compiled.push(ScriptLine { tokens: Rc::new(tokens) }),
                Err(error) => {
                    return Err(LineError { line: self.compiled.len() + 1,
                                           error });
                },
            }
        }

        match self.nest_stack.last() {
            Some(entry) => {
                let error = ParseError::UnclosedBlock { name: entry.kind.name() };
                Err(LineError { line: entry.line + 1,
                                error })
            },
            None => Ok(()),
        }
    }

    /// Executes the compiled lines from the top.
    ///
    /// The program counter advances by one after each line unless a block
    /// statement parked a jump target; jumps land on the target line
    /// itself, which then executes normally.
    ///
    /// # Errors
    /// The first [`RuntimeError`] aborts the run, tagged with the 1-based
    /// number of the line being evaluated.
    pub fn execute(&mut self) -> Result<(), LineError<RuntimeError>> {
        self.pc = 0;
        self.jump = None;
        self.if_results.clear();

        while self.pc < self.compiled.len() {
            let tokens = Rc::clone(&self.compiled[self.pc].tokens);
            if let Err(error) = evaluator::evaluate(self, &tokens) {
                return Err(LineError { line: self.pc + 1,
                                       error });
            }
            self.pc = self.jump.take().unwrap_or(self.pc + 1);
        }

        Ok(())
    }

    /// Parses and evaluates one interactive input line.
    ///
    /// Variable bindings persist across calls on the same module. Blank
    /// input yields nothing.
    ///
    /// # Errors
    /// Parse and runtime errors are boxed uniformly; the prompt reports
    /// both the same way and carries on.
    pub fn eval_line(&mut self, line: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let tokens = parser::parse_line(self, line)?;
        Ok(evaluator::evaluate(self, &tokens)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, RuntimeError};

    fn compiled_output(source: &str) -> String {
        let mut module = ScriptModule::new();
        let buffer = SharedBuffer::default();
        module.set_output(Box::new(buffer.clone()));
        module.compile(source).expect("source should compile");
        module.execute().expect("source should execute");
        buffer.contents()
    }

    #[derive(Clone, Default)]
    struct SharedBuffer {
        bytes: Rc<std::cell::RefCell<Vec<u8>>>,
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn straight_line_programs_run_in_order() {
        let output = compiled_output("x = 1\nprint x\nprint x + 1");
        assert_eq!(output, "1.000000\n2.000000\n");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let output = compiled_output("\nprint 1\n   \nprint 2\n");
        assert_eq!(output, "1.000000\n2.000000\n");
    }

    #[test]
    fn runtime_errors_carry_compiled_line_numbers() {
        let mut module = ScriptModule::new();
        module.compile("print 1\n\nprint 10 / 0").expect("source should compile");

        let failure = module.execute().expect_err("execution should fail");
        // The blank line does not count: the failing line is compiled line 2.
        assert_eq!(failure.line, 2);
        assert_eq!(failure.error, RuntimeError::DivisionByZero);
        assert_eq!(failure.to_string(), "Runtime error on line 2\nDivision by zero");
    }

    #[test]
    fn compile_errors_abort_the_pass() {
        let mut module = ScriptModule::new();
        let failure = module.compile("x = 1\ny = (2\nz = 3").expect_err("compile should fail");

        assert_eq!(failure.line, 2);
        assert_eq!(failure.error, ParseError::MismatchedBrackets);
        assert_eq!(failure.to_string(), "Syntax error on line 2\nMismatched brackets");
    }

    #[test]
    fn interactive_lines_share_state() {
        let mut module = ScriptModule::interactive();
        assert_eq!(module.eval_line("x = 2").unwrap(), Some(Value::Number(2.0)));
        assert_eq!(module.eval_line("x * x").unwrap(), Some(Value::Number(4.0)));
        assert_eq!(module.eval_line("   ").unwrap(), None);
    }

    #[test]
    fn interactive_mode_rejects_block_statements() {
        let mut module = ScriptModule::interactive();
        let error = module.eval_line("if 1").expect_err("block statements are rejected");
        assert_eq!(error.to_string(), "'if' cannot be called from the interactive interpreter");

        let error = module.eval_line("end").expect_err("bare end is rejected");
        assert_eq!(error.to_string(), "'end' statement is missing a begin-type statement");
    }
}
