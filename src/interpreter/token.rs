use crate::interpreter::{function::Function, operator::Operator};

/// A compiled postfix token.
///
/// Operand tokens carry their payload; operator and function tokens borrow
/// their descriptor from the fixed registries. A string constant is either
/// a quoted literal or an identifier deferred until evaluation, where it
/// resolves to a variable reference if a matching variable is live.
#[derive(Debug, Clone)]
pub enum Token {
    /// A numeric constant.
    Number(f64),
    /// A string constant or deferred identifier.
    Str(String),
    /// A reference to a registered operator.
    Operator(&'static Operator),
    /// A reference to a registered function.
    Function(&'static Function),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Operator(operator) => write!(f, "{}", operator.symbol),
            Self::Function(function) => write!(f, "{}", function.name),
        }
    }
}
