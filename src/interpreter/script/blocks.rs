use crate::{
    error::{ParseError, RuntimeError},
    interpreter::{script::core::ScriptModule, value::Value},
};

/// Identifies which block statement a function descriptor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    If,
    ElseIf,
    Else,
    While,
    End,
}

impl BlockKind {
    /// The statement's source name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::ElseIf => "elseif",
            Self::Else => "else",
            Self::While => "while",
            Self::End => "end",
        }
    }

    /// What the matching `end` does for a block whose last recorded opener
    /// is this kind.
    const fn end_action(self) -> EndAction {
        match self {
            Self::If | Self::ElseIf => EndAction::PopBranchResult,
            Self::While => EndAction::LoopBack,
            Self::Else | Self::End => EndAction::None,
        }
    }
}

/// The runtime effect attached to an `end` line at compile time.
///
/// Every branch flag pushed by `if`, `elseif` or `while` is popped exactly
/// once: by the next `elseif`/`else` in the chain, or by the `end` when no
/// later branch consumed it. This keeps nested blocks balanced on the one
/// shared if-result stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    /// Nothing to do: the chain's `else` already consumed the flag.
    None,
    /// Pop the flag left by the chain's final `if` or `elseif`.
    PopBranchResult,
    /// Pop the `while` flag and jump back to re-test when it was true.
    LoopBack,
}

/// A pending block opener awaiting its `end`.
#[derive(Debug, Clone, Copy)]
pub struct NestEntry {
    /// Which statement opened the block (or continued the chain).
    pub kind: BlockKind,
    /// The opener's compiled-line index.
    pub line: usize,
}

/// The compile-time record attached to an `end` line.
#[derive(Debug, Clone, Copy)]
pub struct EndBinding {
    /// The compiled-line index of the matched opener.
    pub opener: usize,
    /// What the `end` does when it executes.
    pub action: EndAction,
}

impl ScriptModule {
    /// Compile hook for block statements, fired as the parser pushes the
    /// statement's function reference.
    ///
    /// `if` and `while` open a nest entry at the current compiled line.
    /// `elseif` and `else` close the chain's previous branch — recording
    /// where a false condition must jump to — and re-open the chain at
    /// their own line. `end` closes the top entry and records both
    /// directions of the mapping plus its runtime action.
    ///
    /// # Errors
    /// - [`ParseError::InteractiveBlock`] for any opener at the prompt.
    /// - [`ParseError::MisplacedBranch`] when `elseif`/`else` do not follow
    ///   an `if` or `elseif`.
    /// - [`ParseError::EndWithoutBlock`] for an `end` with nothing open.
    pub(crate) fn block_compile_hook(&mut self, kind: BlockKind) -> Result<(), ParseError> {
        if self.interactive && kind != BlockKind::End {
            return Err(ParseError::InteractiveBlock { name: kind.name() });
        }

        let line = self.compiled.len();
        match kind {
            BlockKind::If | BlockKind::While => {
                self.nest_stack.push(NestEntry { kind, line });
            },

            BlockKind::ElseIf | BlockKind::Else => {
                let opener = match self.nest_stack.pop() {
                    Some(entry) if matches!(entry.kind, BlockKind::If | BlockKind::ElseIf) => {
                        entry.line
                    },
                    _ => return Err(ParseError::MisplacedBranch { name: kind.name() }),
                };
                self.begin_to_end.insert(opener, line);
                self.nest_stack.push(NestEntry { kind, line });
            },

            BlockKind::End => {
                let Some(entry) = self.nest_stack.pop() else {
                    return Err(ParseError::EndWithoutBlock);
                };
                self.begin_to_end.insert(entry.line, line);
                self.end_to_begin.insert(line, EndBinding { opener: entry.line,
                                                            action: entry.kind.end_action() });
            },
        }

        Ok(())
    }

    /// Runtime behavior of a block statement at the current program
    /// counter.
    ///
    /// `if`/`while` push their condition flag and skip to their closer
    /// when false. `elseif` consumes the previous branch flag: a fired
    /// chain skips the rest wholesale, otherwise its own condition decides.
    /// `else` consumes the flag and runs only when nothing fired. `end`
    /// performs its recorded action. Block statements yield 0 for stack
    /// purposes.
    pub(crate) fn run_block(&mut self,
                            kind: BlockKind,
                            arguments: &[Value])
                            -> Result<f64, RuntimeError> {
        let line = self.pc;
        match kind {
            BlockKind::If | BlockKind::While => {
                let entered = condition(kind, arguments)?;
                self.if_results.push(entered);
                if !entered {
                    self.jump_to_closer(line);
                }
            },

            BlockKind::ElseIf => {
                if self.pop_branch_flag() {
                    self.if_results.push(true);
                    self.jump_to_closer(line);
                } else {
                    let entered = condition(kind, arguments)?;
                    self.if_results.push(entered);
                    if !entered {
                        self.jump_to_closer(line);
                    }
                }
            },

            BlockKind::Else => {
                if self.pop_branch_flag() {
                    self.jump_to_closer(line);
                }
            },

            BlockKind::End => {
                if let Some(binding) = self.end_to_begin.get(&line).copied() {
                    match binding.action {
                        EndAction::None => {},
                        EndAction::PopBranchResult => {
                            self.pop_branch_flag();
                        },
                        EndAction::LoopBack => {
                            if self.pop_branch_flag() {
                                self.jump = Some(binding.opener);
                            }
                        },
                    }
                }
            },
        }

        Ok(0.0)
    }

    fn pop_branch_flag(&mut self) -> bool {
        debug_assert!(!self.if_results.is_empty(), "branch flag stack underflow");
        self.if_results.pop().unwrap_or_default()
    }

    /// Parks a jump to the line that closes the block opened at `line`;
    /// the closer itself executes next.
    fn jump_to_closer(&mut self, line: usize) {
        debug_assert!(self.begin_to_end.contains_key(&line),
                      "block opener has no recorded closer");
        if let Some(&target) = self.begin_to_end.get(&line) {
            self.jump = Some(target);
        }
    }
}

/// Coerces a block statement's condition argument to a flag: any nonzero
/// double is true.
fn condition(kind: BlockKind, arguments: &[Value]) -> Result<bool, RuntimeError> {
    let value = arguments.first()
                         .and_then(Value::as_number)
                         .ok_or(RuntimeError::WrongParameterTypes { function: kind.name() })?;
    Ok(value != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> ScriptModule {
        let mut module = ScriptModule::new();
        module.compile(source).expect("source should compile");
        module
    }

    fn compile_failure(source: &str) -> ParseError {
        ScriptModule::new().compile(source).expect_err("source should not compile").error
    }

    #[test]
    fn if_end_pairs_record_both_directions() {
        let module = compile("if 1\nprint 1\nend");

        assert!(module.nest_stack.is_empty());
        assert_eq!(module.begin_to_end.get(&0), Some(&2));
        let binding = module.end_to_begin.get(&2).unwrap();
        assert_eq!(binding.opener, 0);
        assert_eq!(binding.action, EndAction::PopBranchResult);
    }

    #[test]
    fn chains_relink_at_each_branch() {
        let module = compile("if 0\nprint \"a\"\nelseif 1\nprint \"b\"\nelse\nprint \"c\"\nend");

        // if@0 -> elseif@2 -> else@4 -> end@6
        assert_eq!(module.begin_to_end.get(&0), Some(&2));
        assert_eq!(module.begin_to_end.get(&2), Some(&4));
        assert_eq!(module.begin_to_end.get(&4), Some(&6));
        assert_eq!(module.end_to_begin.get(&6).unwrap().action, EndAction::None);
    }

    #[test]
    fn while_end_loops_back() {
        let module = compile("i = 0\nwhile i < 3\ni = i + 1\nend");

        assert_eq!(module.begin_to_end.get(&1), Some(&3));
        let binding = module.end_to_begin.get(&3).unwrap();
        assert_eq!(binding.opener, 1);
        assert_eq!(binding.action, EndAction::LoopBack);
    }

    #[test]
    fn maps_are_mutual_inverses_for_end_pairs() {
        let module = compile("while 0\nif 1\nprint 1\nend\nend");

        for (&closer, binding) in &module.end_to_begin {
            assert_eq!(module.begin_to_end.get(&binding.opener), Some(&closer));
        }
    }

    #[test]
    fn misplaced_branches_fail_to_compile() {
        assert_eq!(compile_failure("else\nend"),
                   ParseError::MisplacedBranch { name: "else" });
        assert_eq!(compile_failure("elseif 1\nend"),
                   ParseError::MisplacedBranch { name: "elseif" });
        assert_eq!(compile_failure("while 1\nelse\nend"),
                   ParseError::MisplacedBranch { name: "else" });
    }

    #[test]
    fn bare_end_fails_to_compile() {
        assert_eq!(compile_failure("end"), ParseError::EndWithoutBlock);
    }

    #[test]
    fn unclosed_blocks_fail_after_the_last_line() {
        assert_eq!(compile_failure("if 1\nprint 1"),
                   ParseError::UnclosedBlock { name: "if" });
        assert_eq!(compile_failure("while 1"), ParseError::UnclosedBlock { name: "while" });
    }

    #[test]
    fn branch_flags_balance_after_execution() {
        let mut module = compile("x = 0\nif x\nx = 1\nelseif x + 1\nx = 2\nend\nwhile x - 2\nx = 2\nend");
        module.execute().expect("source should execute");

        assert!(module.if_results.is_empty());
        assert_eq!(module.variable("x"), Some(&Value::Number(2.0)));
    }
}
