/// Splits a source line into lexemes.
///
/// The lexer recognizes three lexeme classes: quoted string literals,
/// operand runs (digits, letters and `_`), and operator runs (maximal runs
/// of the remaining punctuation). Whitespace separates lexemes and is
/// discarded.
pub mod lexer;

/// Classifies lexemes into postfix tokens.
pub mod token;

/// The operator registry and operator semantics.
///
/// Declares the fixed table of operator descriptors — symbol, precedence,
/// arity kind and operation list — together with the numeric, string,
/// logical, bitwise and assignment operations they dispatch to.
pub mod operator;

/// The built-in function registry.
///
/// Declares the fixed table of callable built-ins (`sqrt`, `print`) and the
/// block statements (`if`, `elseif`, `else`, `while`, `end`), each with an
/// arity, an argument validator and either a run hook or a block kind.
pub mod function;

/// Reorders one infix line into postfix.
///
/// A shunting-yard pass over the lexer's output: operands are emitted
/// directly, operators and function references travel through a working
/// stack ordered by precedence, and parentheses group. Block statements
/// fire their compile hooks here.
pub mod parser;

/// Executes one postfix line against a value stack.
///
/// Walks a compiled token list, pushing constants and variable references,
/// dispatching operators through their operation lists, and invoking
/// functions after validating their arguments.
pub mod evaluator;

/// Per-program state and the two-pass compile/execute model.
///
/// The `ScriptModule` owns the compiled lines, the variable store, the
/// block-structure maps and the program counter, and drives both the batch
/// passes and the interactive per-line path.
pub mod script;

/// Runtime values and numeric comparison tolerance.
pub mod value;
