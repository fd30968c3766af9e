use std::str::CharIndices;

use crate::ast::GateKind;
use crate::error::ParseError;

/// Binary operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Xor,
    Nand,
    Nor,
}

impl Operator {
    /// Binding strength of the operator. Higher binds tighter.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Operator::And | Operator::Nand => 3,
            Operator::Or | Operator::Xor | Operator::Nor => 2,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operator::And => '*',
            Operator::Or => '+',
            Operator::Xor => '^',
            Operator::Nand => '%',
            Operator::Nor => '$',
        }
    }

    #[must_use]
    pub fn gate_kind(self) -> GateKind {
        match self {
            Operator::And => GateKind::And,
            Operator::Or => GateKind::Or,
            Operator::Xor => GateKind::Xor,
            Operator::Nand => GateKind::Nand,
            Operator::Nor => GateKind::Nor,
        }
    }

    fn from_symbol(symbol: char) -> Option<Operator> {
        Some(match symbol {
            '*' => Operator::And,
            '+' => Operator::Or,
            '^' => Operator::Xor,
            '%' => Operator::Nand,
            '$' => Operator::Nor,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Variable(char),
    /// Postfix `'`.
    Not,
    Operator(Operator),
    Open,
    Close,
}

/// Single-pass scanner over the characters of an expression. Yields
/// tokens together with their byte offset and skips whitespace.
pub(crate) struct Lexer<'a> {
    chars: CharIndices<'a>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(expression: &'a str) -> Self {
        Lexer {
            chars: expression.char_indices(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<(usize, Token), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (position, character) = self.chars.find(|(_, c)| !c.is_whitespace())?;

        let token = match character {
            '\'' => Token::Not,
            '(' => Token::Open,
            ')' => Token::Close,
            c if c.is_ascii_alphanumeric() => Token::Variable(c.to_ascii_uppercase()),
            c => match Operator::from_symbol(c) {
                Some(operator) => Token::Operator(operator),
                None => {
                    return Some(Err(ParseError::UnexpectedCharacter {
                        character: c,
                        position,
                    }))
                }
            },
        };

        Some(Ok((position, token)))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Lexer, Operator, Token};
    use crate::error::ParseError;

    fn tokens(expression: &str) -> Result<Vec<Token>, ParseError> {
        Lexer::new(expression)
            .map(|token| token.map(|(_, token)| token))
            .collect()
    }

    #[test]
    fn scans_all_token_kinds() {
        assert_eq!(
            tokens(" a * (B' + c) ^ d % e $ f").unwrap(),
            vec![
                Token::Variable('A'),
                Token::Operator(Operator::And),
                Token::Open,
                Token::Variable('B'),
                Token::Not,
                Token::Operator(Operator::Or),
                Token::Variable('C'),
                Token::Close,
                Token::Operator(Operator::Xor),
                Token::Variable('D'),
                Token::Operator(Operator::Nand),
                Token::Variable('E'),
                Token::Operator(Operator::Nor),
                Token::Variable('F'),
            ]
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            tokens("A & B"),
            Err(ParseError::UnexpectedCharacter {
                character: '&',
                position: 2
            })
        );
        assert_eq!(
            tokens("!A"),
            Err(ParseError::UnexpectedCharacter {
                character: '!',
                position: 0
            })
        );
    }

    #[test]
    fn precedence_table() {
        assert!(Operator::And.precedence() > Operator::Or.precedence());
        assert_eq!(Operator::Nand.precedence(), Operator::And.precedence());
        assert_eq!(Operator::Xor.precedence(), Operator::Nor.precedence());
    }
}
