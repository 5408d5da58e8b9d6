#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised while evaluating a compiled
/// line.
pub enum RuntimeError {
    /// The value stack held fewer values than the operator's arity.
    InvalidOperandCount {
        /// The operator symbol.
        symbol: &'static str,
    },
    /// No registered operation of the operator matched the operand kinds.
    InvalidOperands {
        /// The operator symbol.
        symbol: &'static str,
    },
    /// The value stack held fewer values than the function's arity.
    InvalidArgumentCount {
        /// The function name.
        function: &'static str,
    },
    /// A function's argument kinds failed validation.
    WrongParameterTypes {
        /// The function name.
        function: &'static str,
    },
    /// A line left more than one residual value on the stack.
    NotAnExpression,
    /// Attempted division by zero.
    DivisionByZero,
    /// Attempted modulo by zero.
    ModuloByZero,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOperandCount { symbol } => {
                write!(f, "Invalid number of operands for operator {symbol}")
            },

            Self::InvalidOperands { symbol } => {
                write!(f, "Invalid operands for operator {symbol}")
            },

            Self::InvalidArgumentCount { function } => {
                write!(f, "Invalid number of arguments for function {function}")
            },

            Self::WrongParameterTypes { function } => {
                write!(f, "Wrong parameter types for function {function}")
            },

            Self::NotAnExpression => write!(f, "Not a valid expression"),

            Self::DivisionByZero => write!(f, "Division by zero"),

            Self::ModuloByZero => write!(f, "Modulo by zero"),
        }
    }
}

impl std::error::Error for RuntimeError {}
