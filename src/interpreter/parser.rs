use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::{
        function::{self, Function, FunctionKind},
        lexer::Lexeme,
        operator::{self, Operator},
        script::core::ScriptModule,
        token::Token,
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// An entry on the parser's working stack.
///
/// Operators wait here until something they precede arrives; function
/// references wait until the end of the line or an enclosing `)` drains
/// them, so a prefix call applies to the whole expression parsed to its
/// right.
enum StackEntry {
    Operator(&'static Operator),
    Function(&'static Function),
}

impl StackEntry {
    fn into_token(self) -> Token {
        match self {
            Self::Operator(operator) => Token::Operator(operator),
            Self::Function(function) => Token::Function(function),
        }
    }

    fn is_open_bracket(&self) -> bool {
        matches!(self, Self::Operator(operator) if operator.symbol == "(")
    }

    /// Whether this stack entry pops to output before `incoming` pushes.
    ///
    /// Binary operators are left-associative (equal precedence pops);
    /// unary operators are right-associative (equal precedence stays).
    /// Open brackets never pop here. A pending function yields only to a
    /// prefix operator that binds tighter than it; no binary operator pops
    /// it, so a prefix call spans everything parsed to its right.
    fn precedes(&self, incoming: &Operator) -> bool {
        match self {
            Self::Function(function) => {
                incoming.is_unary() && function.precedence > incoming.precedence
            },
            Self::Operator(operator) => {
                if operator.is_grouping() {
                    return false;
                }
                if incoming.is_unary() {
                    operator.precedence > incoming.precedence
                } else {
                    operator.precedence >= incoming.precedence
                }
            },
        }
    }
}

/// Reorders one infix source line into a postfix token list.
///
/// Walks the line's lexemes once. Operands are emitted directly: numeric
/// literals as numeric constants, quoted strings as string constants, and
/// identifiers as deferred string constants unless they name a registered
/// function. Function references and operators travel through the working
/// stack; block statements fire their compile hook on the module as they
/// are pushed.
///
/// # Errors
/// - [`ParseError::MismatchedQuotes`] for an unterminated string literal.
/// - [`ParseError::UnsupportedOperator`] for an operator run matching no
///   registered symbol.
/// - [`ParseError::MismatchedBrackets`] for an unpaired `(` or `)`.
/// - Block-structure errors propagated from the compile hooks.
pub fn parse_line(module: &mut ScriptModule, line: &str) -> ParseResult<Vec<Token>> {
    let mut output = Vec::new();
    let mut pending: Vec<StackEntry> = Vec::new();
    let mut expects_operand = true;

    for item in Lexeme::lexer(line) {
        match item.map_err(|()| ParseError::MismatchedQuotes)? {
            Lexeme::Quoted(text) => {
                output.push(Token::Str(text));
                expects_operand = false;
            },

            Lexeme::Word(word) => {
                if let Ok(number) = word.parse::<f64>() {
                    output.push(Token::Number(number));
                    expects_operand = false;
                } else if let Some(function) = function::lookup(&word) {
                    if let FunctionKind::Block(kind) = function.kind {
                        module.block_compile_hook(kind)?;
                    }
                    pending.push(StackEntry::Function(function));
                    expects_operand = true;
                } else {
                    output.push(Token::Str(word));
                    expects_operand = false;
                }
            },

            Lexeme::Symbols(symbols) => {
                let Some(incoming) = operator::lookup(&symbols, expects_operand) else {
                    return Err(ParseError::UnsupportedOperator { symbol: symbols });
                };

                if incoming.symbol == ")" {
                    loop {
                        match pending.pop() {
                            None => return Err(ParseError::MismatchedBrackets),
                            Some(entry) if entry.is_open_bracket() => break,
                            Some(entry) => output.push(entry.into_token()),
                        }
                    }
                    expects_operand = false;
                } else {
                    if !incoming.is_grouping() {
                        while let Some(top) = pending.last() {
                            if !top.precedes(incoming) {
                                break;
                            }
                            let Some(entry) = pending.pop() else { break };
                            output.push(entry.into_token());
                        }
                    }
                    pending.push(StackEntry::Operator(incoming));
                    expects_operand = true;
                }
            },

            Lexeme::Whitespace => {},
        }
    }

    while let Some(entry) = pending.pop() {
        if entry.is_open_bracket() {
            return Err(ParseError::MismatchedBrackets);
        }
        output.push(entry.into_token());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(line: &str) -> String {
        let mut module = ScriptModule::new();
        let tokens = parse_line(&mut module, line).expect("line should parse");
        tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
    }

    fn parse_failure(line: &str) -> ParseError {
        let mut module = ScriptModule::new();
        parse_line(&mut module, line).expect_err("line should not parse")
    }

    #[test]
    fn precedence_orders_output() {
        assert_eq!(postfix("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(postfix("1 * 2 + 3"), "1 2 * 3 +");
        assert_eq!(postfix("x = 1 < 2 && 3 < 4"), "x 1 2 < 3 4 < && =");
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(postfix("10 - 3 - 2"), "10 3 - 2 -");
        assert_eq!(postfix("2 ^ 3 ^ 2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(postfix("(1 + 2) * 3"), "1 2 + 3 *");
        assert_eq!(postfix("2 * (3 + 4)"), "2 3 4 + *");
    }

    #[test]
    fn unary_minus_is_chosen_by_context() {
        // Line start, after `(`, and after an operator are prefix spots.
        assert_eq!(postfix("- 2 + 3"), "2 - 3 +");
        assert_eq!(postfix("1 - 2"), "1 2 -");
        assert_eq!(postfix("1 * ( - 2 )"), "1 2 - *");
        assert_eq!(postfix("1 + - 2"), "1 2 - +");
    }

    #[test]
    fn unary_binds_tighter_than_binary() {
        // `- 2 ^ 2` squares the negated operand.
        assert_eq!(postfix("- 2 ^ 2"), "2 - 2 ^");
        assert_eq!(postfix("! 1 && 0"), "1 ! 0 &&");
    }

    #[test]
    fn functions_wait_for_the_whole_expression() {
        assert_eq!(postfix("sqrt 9"), "9 sqrt");
        assert_eq!(postfix("print 5 + sqrt 9"), "5 9 sqrt + print");
        assert_eq!(postfix("print \"foo\" + \"bar\""), "foo bar + print");
        assert_eq!(postfix("print(x)"), "x print");
    }

    #[test]
    fn identifiers_defer_to_string_constants() {
        assert_eq!(postfix("x = y"), "x y =");
        assert_eq!(postfix("x_1 = 42abc"), "x_1 42abc =");
    }

    #[test]
    fn maximal_operator_runs_are_rejected_whole() {
        assert_eq!(parse_failure("1 +- 2"),
                   ParseError::UnsupportedOperator { symbol: "+-".into() });
        assert_eq!(parse_failure("(1)*2"),
                   ParseError::UnsupportedOperator { symbol: ")*".into() });
    }

    #[test]
    fn unpaired_brackets_fail() {
        assert_eq!(parse_failure("(1 + 2"), ParseError::MismatchedBrackets);
        assert_eq!(parse_failure("1 + 2)"), ParseError::MismatchedBrackets);
    }

    #[test]
    fn unterminated_string_fails() {
        assert_eq!(parse_failure("\"hi"), ParseError::MismatchedQuotes);
    }
}
