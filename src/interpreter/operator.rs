use crate::{error::RuntimeError, interpreter::value::doubles_equal};

/// Result of one numeric operation.
pub type OperationResult = Result<f64, RuntimeError>;

/// An immutable operator descriptor.
///
/// Descriptors live in the fixed [`OPERATORS`] table and are shared by
/// reference; compiled tokens borrow them for the lifetime of the process.
#[derive(Debug)]
pub struct Operator {
    /// The operator's source text.
    pub symbol:     &'static str,
    /// Binding strength; lower binds looser.
    pub precedence: u8,
    /// Arity class and operation list.
    pub kind:       OperatorKind,
}

/// The arity class of an operator, carrying its operations.
///
/// Arity is a property of the descriptor kind, never a stored count. The
/// grouping kind covers `(` and `)`, which the parser handles specially and
/// which never evaluate.
#[derive(Debug)]
pub enum OperatorKind {
    /// Prefix operators taking one numeric operand.
    Unary(&'static [UnaryOperation]),
    /// Infix operators taking two operands.
    Binary(&'static [BinaryOperation]),
    /// Parentheses.
    Grouping,
}

/// A single-operand operation.
#[derive(Debug)]
pub enum UnaryOperation {
    /// Applies to a numeric operand.
    Numeric(fn(f64) -> f64),
}

/// A dual-operand operation.
///
/// An operator's operation list is tried in order; the first whose operand
/// kinds match produces the result. `+` registers a numeric operation
/// followed by a string one, which is how one symbol is multi-typed.
#[derive(Debug)]
pub enum BinaryOperation {
    /// Applies when both operands are numeric.
    Numeric(fn(f64, f64) -> OperationResult),
    /// Applies when both operands are strings.
    Strings(fn(&str, &str) -> String),
    /// Writes the right value into the variable store under the left
    /// operand's name.
    Assign,
}

impl Operator {
    /// Returns `true` for prefix operators.
    #[must_use]
    pub const fn is_unary(&self) -> bool {
        matches!(self.kind, OperatorKind::Unary(..))
    }

    /// Returns `true` for `(` and `)`.
    #[must_use]
    pub const fn is_grouping(&self) -> bool {
        matches!(self.kind, OperatorKind::Grouping)
    }
}

/// The fixed operator table.
///
/// Symbols may repeat across arity classes (`-` is both binary and unary);
/// [`lookup`] disambiguates by parse context.
pub static OPERATORS: &[Operator] = &[
    Operator { symbol:     "=",
               precedence: 2,
               kind:       OperatorKind::Binary(&[BinaryOperation::Assign]), },
    Operator { symbol:     "||",
               precedence: 5,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(logical_or)]), },
    Operator { symbol:     "&&",
               precedence: 7,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(logical_and)]), },
    Operator { symbol:     "==",
               precedence: 13,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(equals)]), },
    Operator { symbol:     "!=",
               precedence: 15,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(not_equals)]), },
    Operator { symbol:     ">",
               precedence: 15,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(greater)]), },
    Operator { symbol:     "<",
               precedence: 15,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(less)]), },
    Operator { symbol:     ">=",
               precedence: 15,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(greater_equal)]), },
    Operator { symbol:     "<=",
               precedence: 15,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(less_equal)]), },
    Operator { symbol:     "|",
               precedence: 16,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(bitwise_or)]), },
    Operator { symbol:     "&",
               precedence: 16,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(bitwise_and)]), },
    Operator { symbol:     "<<",
               precedence: 18,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(shift_left)]), },
    Operator { symbol:     ">>",
               precedence: 18,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(shift_right)]), },
    Operator { symbol:     "+",
               precedence: 19,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(add),
                                                  BinaryOperation::Strings(concatenate)]), },
    Operator { symbol:     "-",
               precedence: 19,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(subtract)]), },
    Operator { symbol:     "*",
               precedence: 21,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(multiply)]), },
    Operator { symbol:     "/",
               precedence: 21,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(divide)]), },
    Operator { symbol:     "%",
               precedence: 21,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(modulo)]), },
    Operator { symbol:     "^",
               precedence: 23,
               kind:       OperatorKind::Binary(&[BinaryOperation::Numeric(power)]), },
    Operator { symbol:     "-",
               precedence: 25,
               kind:       OperatorKind::Unary(&[UnaryOperation::Numeric(negate)]), },
    Operator { symbol:     "!",
               precedence: 27,
               kind:       OperatorKind::Unary(&[UnaryOperation::Numeric(logical_not)]), },
    Operator { symbol:     "(",
               precedence: 80,
               kind:       OperatorKind::Grouping, },
    Operator { symbol:     ")",
               precedence: 80,
               kind:       OperatorKind::Grouping, },
];

/// Finds the descriptor for an operator symbol.
///
/// `expects_operand` is the parse context: at a position where an operand
/// would come next (line start, after another operator, after `(`, after a
/// function name) the unary descriptor for the symbol is preferred;
/// otherwise the binary one is.
#[must_use]
pub fn lookup(symbol: &str, expects_operand: bool) -> Option<&'static Operator> {
    let unary = OPERATORS.iter().find(|op| op.symbol == symbol && op.is_unary());
    let other = OPERATORS.iter().find(|op| op.symbol == symbol && !op.is_unary());

    if expects_operand { unary.or(other) } else { other.or(unary) }
}

fn logical_or(a: f64, b: f64) -> OperationResult {
    Ok(f64::from(a != 0.0 || b != 0.0))
}

fn logical_and(a: f64, b: f64) -> OperationResult {
    Ok(f64::from(a != 0.0 && b != 0.0))
}

fn equals(a: f64, b: f64) -> OperationResult {
    Ok(f64::from(doubles_equal(a, b)))
}

fn not_equals(a: f64, b: f64) -> OperationResult {
    Ok(f64::from(!doubles_equal(a, b)))
}

fn greater(a: f64, b: f64) -> OperationResult {
    Ok(f64::from(a > b))
}

fn less(a: f64, b: f64) -> OperationResult {
    Ok(f64::from(a < b))
}

fn greater_equal(a: f64, b: f64) -> OperationResult {
    Ok(f64::from(a >= b))
}

fn less_equal(a: f64, b: f64) -> OperationResult {
    Ok(f64::from(a <= b))
}

#[allow(clippy::cast_possible_truncation)]
fn bitwise_or(a: f64, b: f64) -> OperationResult {
    Ok(f64::from((a as i32) | (b as i32)))
}

#[allow(clippy::cast_possible_truncation)]
fn bitwise_and(a: f64, b: f64) -> OperationResult {
    Ok(f64::from((a as i32) & (b as i32)))
}

// Left shift widens to 64 bits first so shifted-out bits survive the
// round trip back into a double.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn shift_left(a: f64, b: f64) -> OperationResult {
    Ok((a as i64).wrapping_shl(b as u32) as f64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shift_right(a: f64, b: f64) -> OperationResult {
    Ok(f64::from((a as i32).wrapping_shr(b as u32)))
}

fn add(a: f64, b: f64) -> OperationResult {
    Ok(a + b)
}

fn concatenate(a: &str, b: &str) -> String {
    format!("{a}{b}")
}

fn subtract(a: f64, b: f64) -> OperationResult {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> OperationResult {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> OperationResult {
    if b == 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(a / b)
}

// The divisor is checked after the integer coercion: a fractional divisor
// below one would otherwise reach `%` as zero.
#[allow(clippy::cast_possible_truncation)]
fn modulo(a: f64, b: f64) -> OperationResult {
    let divisor = b as i32;
    if divisor == 0 {
        return Err(RuntimeError::ModuloByZero);
    }
    Ok(f64::from((a as i32) % divisor))
}

fn power(a: f64, b: f64) -> OperationResult {
    Ok(a.powf(b))
}

fn negate(a: f64) -> f64 {
    -a
}

fn logical_not(a: f64) -> f64 {
    f64::from(a == 0.0)
}
