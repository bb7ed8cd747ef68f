//! Tokenizer and implicit concatenation.

use crate::operator::Operator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Any character that is not an operator or a parenthesis.
    Literal(char),
    Operator(Operator),
    Open,
    Close,
}

/// A token and the character offset it was read at. Inserted concatenations take the offset of the token after them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl TokenKind {
    fn from_char(c: char) -> Self {
        match c {
            '(' => TokenKind::Open,
            ')' => TokenKind::Close,
            c => Operator::from_char(c).map_or(TokenKind::Literal(c), TokenKind::Operator),
        }
    }

    fn is_literal(self) -> bool {
        matches!(self, TokenKind::Literal(_))
    }

    fn is_postfix(self) -> bool {
        matches!(self, TokenKind::Operator(operator) if operator.is_postfix())
    }
}

/// Returns if an explicit `,` goes between `last` and `next`: `a*b`, `a*(b)`, `ab`, `(a)b` and `a(b)` are
/// concatenations.
fn implicit_concatenation(last: TokenKind, next: TokenKind) -> bool {
    (last.is_postfix() && (next == TokenKind::Open || next.is_literal()))
        || (last.is_literal() && next.is_literal())
        || (last == TokenKind::Close && next.is_literal())
        || (last.is_literal() && next == TokenKind::Open)
}

/// Splits the regex into tokens, inserting the concatenations it leaves implicit.
pub fn tokenize(regex: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(regex.len() * 2);
    for (position, c) in regex.chars().enumerate() {
        let kind = TokenKind::from_char(c);
        if tokens.last().is_some_and(|last| implicit_concatenation(last.kind, kind)) {
            tokens.push(Token {
                kind: TokenKind::Operator(Operator::Concatenation),
                position,
            });
        }
        tokens.push(Token { kind, position });
    }
    tokens
}
