use logos::Logos;

/// A lexeme produced from one source line.
///
/// Lexemes are minimal spans of text; the parser decides what each one
/// means. Operand runs and operator runs are both maximal: the lexer never
/// splits `x_1` into two operands or `)*` into two operators.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Lexeme {
    /// A double-quoted string literal, quotes stripped. No escape
    /// sequences: the literal ends at the first closing `"`.
    #[regex(r#""[^"]*""#, trim_quotes)]
    Quoted(String),
    /// An operand run: digits, letters and `_`. Numeric literals,
    /// identifiers and statement keywords all arrive as words.
    #[regex(r"[0-9A-Za-z_]+", |lex| lex.slice().to_string())]
    Word(String),
    /// An operator run: a maximal run of punctuation that is neither
    /// alphanumeric, whitespace, `_` nor `"`.
    #[regex(r#"[^0-9A-Za-z_ \t\r\n\f"]+"#, |lex| lex.slice().to_string())]
    Symbols(String),
    /// Spaces and tabs between lexemes.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,
}

/// Strips the surrounding quotes from a matched string literal.
fn trim_quotes(lex: &logos::Lexer<Lexeme>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}
