use crate::{
    error::RuntimeError,
    interpreter::{
        function::{Function, FunctionKind},
        operator::{BinaryOperation, Operator, OperatorKind, UnaryOperation},
        script::core::ScriptModule,
        token::Token,
        value::Value,
    },
};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A slot on the evaluation stack.
///
/// String constants that name a live variable are pushed as references and
/// read through the store when used, so an identifier always sees the
/// variable's current value. Everything else is pushed as a plain value.
#[derive(Debug, Clone)]
enum Slot {
    Value(Value),
    Variable(String),
}

impl Slot {
    /// Reads the slot's current value.
    ///
    /// A reference whose variable has vanished degrades to its bare name,
    /// the same shape an unresolved identifier is pushed with.
    fn resolve(&self, module: &ScriptModule) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Variable(name) => module.variables
                                          .get(name)
                                          .cloned()
                                          .unwrap_or_else(|| Value::Str(name.clone())),
        }
    }

    /// The variable name this slot can assign into, if any.
    ///
    /// Assignment targets are variable references and non-empty unresolved
    /// string constants; numbers are not assignable.
    fn target_name(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            Self::Value(Value::Str(name)) if !name.is_empty() => Some(name),
            Self::Value(_) => None,
        }
    }
}

/// Executes one compiled line against a fresh value stack.
///
/// Returns the line's residual value: `Some` for an expression, `None` for
/// a statement that leaves the stack empty. More than one residual value is
/// an error.
///
/// # Errors
/// Stack underflow, operand kind mismatches, failed argument validation,
/// arithmetic failures raised by operations, and leftover stack values all
/// surface as [`RuntimeError`]s.
pub fn evaluate(module: &mut ScriptModule, tokens: &[Token]) -> EvalResult<Option<Value>> {
    let mut stack: Vec<Slot> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(number) => stack.push(Slot::Value(Value::Number(*number))),

            Token::Str(text) => {
                if module.variables.contains_key(text) {
                    stack.push(Slot::Variable(text.clone()));
                } else {
                    stack.push(Slot::Value(Value::Str(text.clone())));
                }
            },

            Token::Operator(operator) => apply_operator(module, operator, &mut stack)?,

            Token::Function(function) => apply_function(module, function, &mut stack)?,
        }
    }

    match stack.len() {
        0 => Ok(None),
        1 => Ok(stack.pop().map(|slot| slot.resolve(module))),
        _ => Err(RuntimeError::NotAnExpression),
    }
}

/// Pops an operator's operands and dispatches through its operation list;
/// the first operation whose operand kinds match produces the result.
fn apply_operator(module: &mut ScriptModule,
                  operator: &'static Operator,
                  stack: &mut Vec<Slot>)
                  -> EvalResult<()> {
    match operator.kind {
        OperatorKind::Binary(operations) => {
            let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                return Err(RuntimeError::InvalidOperandCount { symbol: operator.symbol });
            };

            for operation in operations {
                if let Some(result) = apply_binary(module, operation, &lhs, &rhs)? {
                    stack.push(result);
                    return Ok(());
                }
            }
            Err(RuntimeError::InvalidOperands { symbol: operator.symbol })
        },

        OperatorKind::Unary(operations) => {
            let Some(operand) = stack.pop() else {
                return Err(RuntimeError::InvalidOperandCount { symbol: operator.symbol });
            };

            for UnaryOperation::Numeric(operation) in operations {
                if let Some(number) = operand.resolve(module).as_number() {
                    stack.push(Slot::Value(Value::Number(operation(number))));
                    return Ok(());
                }
            }
            Err(RuntimeError::InvalidOperands { symbol: operator.symbol })
        },

        // Parentheses never reach compiled output.
        OperatorKind::Grouping => Err(RuntimeError::InvalidOperands { symbol: operator.symbol }),
    }
}

/// Tries one binary operation; `None` means the operand kinds did not
/// match and the next operation should be tried.
fn apply_binary(module: &mut ScriptModule,
                operation: &BinaryOperation,
                lhs: &Slot,
                rhs: &Slot)
                -> EvalResult<Option<Slot>> {
    match operation {
        BinaryOperation::Numeric(numeric) => {
            let (Some(a), Some(b)) = (lhs.resolve(module).as_number(),
                                      rhs.resolve(module).as_number())
            else {
                return Ok(None);
            };
            Ok(Some(Slot::Value(Value::Number(numeric(a, b)?))))
        },

        BinaryOperation::Strings(strings) => {
            let (lhs, rhs) = (lhs.resolve(module), rhs.resolve(module));
            let (Some(a), Some(b)) = (lhs.as_str(), rhs.as_str()) else {
                return Ok(None);
            };
            Ok(Some(Slot::Value(Value::Str(strings(a, b)))))
        },

        BinaryOperation::Assign => {
            let Some(name) = lhs.target_name() else {
                return Ok(None);
            };
            let name = name.to_string();
            let value = rhs.resolve(module);
            module.variables.insert(name.clone(), value);
            Ok(Some(Slot::Variable(name)))
        },
    }
}

/// Pops a function's arguments (nearest value first), validates them, and
/// runs the function's hook. The hook's double result is pushed back.
fn apply_function(module: &mut ScriptModule,
                  function: &'static Function,
                  stack: &mut Vec<Slot>)
                  -> EvalResult<()> {
    if stack.len() < function.arity {
        return Err(RuntimeError::InvalidArgumentCount { function: function.name });
    }

    let mut arguments = Vec::with_capacity(function.arity);
    for _ in 0..function.arity {
        if let Some(slot) = stack.pop() {
            arguments.push(slot.resolve(module));
        }
    }

    if !(function.validate)(&arguments) {
        return Err(RuntimeError::WrongParameterTypes { function: function.name });
    }

    let result = match function.kind {
        FunctionKind::Plain(run) => run(module, &arguments)?,
        FunctionKind::Block(kind) => module.run_block(kind, &arguments)?,
    };
    stack.push(Slot::Value(Value::Number(result)));

    Ok(())
}
