use crate::{
    error::RuntimeError,
    interpreter::{
        script::{blocks::BlockKind, core::ScriptModule},
        value::Value,
    },
};

/// Every function binds at this precedence, the same as `^`.
pub const FUNCTION_PRECEDENCE: u8 = 23;

/// Signature of a plain function's run hook.
pub type RunHook = fn(&mut ScriptModule, &[Value]) -> Result<f64, RuntimeError>;

/// An immutable function descriptor.
///
/// Functions are called in prefix form without argument parentheses:
/// `sqrt 9`. Arguments are validated against `validate` before the hook
/// runs; every function yields a double onto the value stack.
#[derive(Debug)]
pub struct Function {
    /// The name the parser matches operand runs against.
    pub name:       &'static str,
    /// How many values the call consumes.
    pub arity:      usize,
    /// Binding strength on the parser's working stack.
    pub precedence: u8,
    /// Checks argument kinds before the hook runs.
    pub validate:   fn(&[Value]) -> bool,
    /// Plain run hook, or the block statement this name opens or closes.
    pub kind:       FunctionKind,
}

/// Separates user-callable built-ins from block statements.
#[derive(Debug)]
pub enum FunctionKind {
    /// A built-in with a run hook.
    Plain(RunHook),
    /// A block statement; its behavior lives with the script module.
    Block(BlockKind),
}

/// The fixed function table.
pub static FUNCTIONS: &[Function] = &[
    Function { name:       "sqrt",
               arity:      1,
               precedence: FUNCTION_PRECEDENCE,
               validate:   numeric_arguments,
               kind:       FunctionKind::Plain(sqrt), },
    Function { name:       "print",
               arity:      1,
               precedence: FUNCTION_PRECEDENCE,
               validate:   any_arguments,
               kind:       FunctionKind::Plain(print), },
    Function { name:       "if",
               arity:      1,
               precedence: FUNCTION_PRECEDENCE,
               validate:   numeric_arguments,
               kind:       FunctionKind::Block(BlockKind::If), },
    Function { name:       "elseif",
               arity:      1,
               precedence: FUNCTION_PRECEDENCE,
               validate:   numeric_arguments,
               kind:       FunctionKind::Block(BlockKind::ElseIf), },
    Function { name:       "else",
               arity:      0,
               precedence: FUNCTION_PRECEDENCE,
               validate:   any_arguments,
               kind:       FunctionKind::Block(BlockKind::Else), },
    Function { name:       "while",
               arity:      1,
               precedence: FUNCTION_PRECEDENCE,
               validate:   numeric_arguments,
               kind:       FunctionKind::Block(BlockKind::While), },
    Function { name:       "end",
               arity:      0,
               precedence: FUNCTION_PRECEDENCE,
               validate:   any_arguments,
               kind:       FunctionKind::Block(BlockKind::End), },
];

/// Finds the descriptor for a function name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|function| function.name == name)
}

fn numeric_arguments(arguments: &[Value]) -> bool {
    arguments.iter().all(Value::is_number)
}

fn any_arguments(_: &[Value]) -> bool {
    true
}

/// `sqrt n` — the square root of a numeric argument.
fn sqrt(_: &mut ScriptModule, arguments: &[Value]) -> Result<f64, RuntimeError> {
    let value = arguments[0].as_number()
                            .ok_or(RuntimeError::WrongParameterTypes { function: "sqrt" })?;
    Ok(value.sqrt())
}

/// `print x` — writes the value and a newline to the module's output,
/// returning 1.
fn print(module: &mut ScriptModule, arguments: &[Value]) -> Result<f64, RuntimeError> {
    module.print_value(&arguments[0]);
    Ok(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_registered_names() {
        assert_eq!(lookup("sqrt").unwrap().arity, 1);
        assert_eq!(lookup("else").unwrap().arity, 0);
        assert!(lookup("cos").is_none());
    }

    #[test]
    fn block_statements_carry_their_kind() {
        let function = lookup("while").unwrap();
        assert!(matches!(function.kind, FunctionKind::Block(BlockKind::While)));
    }

    #[test]
    fn validators_check_kinds() {
        let sqrt = lookup("sqrt").unwrap();
        assert!((sqrt.validate)(&[Value::Number(9.0)]));
        assert!(!(sqrt.validate)(&[Value::from("nine")]));

        let print = lookup("print").unwrap();
        assert!((print.validate)(&[Value::from("anything")]));
    }
}
