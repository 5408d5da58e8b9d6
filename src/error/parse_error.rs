#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while compiling a source line.
pub enum ParseError {
    /// A quoted string was opened but never closed on the same line.
    MismatchedQuotes,
    /// An operator run did not match any registered operator symbol.
    UnsupportedOperator {
        /// The operator text as it appeared in the source.
        symbol: String,
    },
    /// A `(` or `)` had no matching partner on the line.
    MismatchedBrackets,
    /// An `elseif` or `else` appeared without a preceding `if`.
    MisplacedBranch {
        /// The statement that was misplaced.
        name: &'static str,
    },
    /// An `end` appeared with no open block to close.
    EndWithoutBlock,
    /// A block was opened but the source ran out before its `end`.
    UnclosedBlock {
        /// The statement that opened the block.
        name: &'static str,
    },
    /// A block statement was entered at the interactive prompt.
    InteractiveBlock {
        /// The statement that was rejected.
        name: &'static str,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MismatchedQuotes => write!(f, "Mismatched quotation marks (\")"),

            Self::UnsupportedOperator { symbol } => write!(f, "Unsupported operator {symbol}"),

            Self::MismatchedBrackets => write!(f, "Mismatched brackets"),

            Self::MisplacedBranch { name } => write!(f, "Misplaced '{name}': missing 'if'"),

            Self::EndWithoutBlock => {
                write!(f, "'end' statement is missing a begin-type statement")
            },

            Self::UnclosedBlock { name } => {
                write!(f, "Begin-type block '{name}' is missing an 'end'")
            },

            Self::InteractiveBlock { name } => {
                write!(f, "'{name}' cannot be called from the interactive interpreter")
            },
        }
    }
}

impl std::error::Error for ParseError {}
