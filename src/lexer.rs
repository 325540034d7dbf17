//! Tokenizer for the textual expression syntax.

use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::error::ParseError;

#[derive(Logos, Debug, Copy, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'src> {
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*", |lex| lex.slice())]
    Identifier(&'src str),

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("1")]
    True,
    #[token("0")]
    False,

    #[token("&")]
    #[token("*")]
    #[token("∧")]
    And,

    #[token("^")]
    #[token("⊕")]
    Xor,

    #[token("|")]
    #[token("+")]
    #[token("∨")]
    Or,

    #[token("¬")]
    #[token("!")]
    Not,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::LeftParen => write!(f, "'('"),
            Token::RightParen => write!(f, "')'"),
            Token::True => write!(f, "'1'"),
            Token::False => write!(f, "'0'"),
            Token::And => write!(f, "'*'"),
            Token::Xor => write!(f, "'^'"),
            Token::Or => write!(f, "'+'"),
            Token::Not => write!(f, "'¬'"),
        }
    }
}

/// A token along with its byte span in the input.
pub type Spanned<'src> = (Token<'src>, Range<usize>);

/// Splits `input` into tokens, failing on the first character that starts
/// no token.
pub fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>, ParseError> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(ParseError::new(
                    format!("unexpected character sequence '{}'", lexer.slice()),
                    lexer.span().start,
                ))
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn kinds(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_operator_aliases() {
        assert_eq!(kinds("& * ∧"), vec![Token::And; 3]);
        assert_eq!(kinds("| + ∨"), vec![Token::Or; 3]);
        assert_eq!(kinds("^ ⊕"), vec![Token::Xor; 2]);
        assert_eq!(kinds("¬ !"), vec![Token::Not; 2]);
    }

    #[test]
    fn test_identifiers_and_constants() {
        assert_eq!(
            kinds("(a1+B)*0 1"),
            vec![
                Token::LeftParen,
                Token::Identifier("a1"),
                Token::Or,
                Token::Identifier("B"),
                Token::RightParen,
                Token::And,
                Token::False,
                Token::True,
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("ab * c").unwrap();
        assert_eq!(tokens[0].1, 0..2);
        assert_eq!(tokens[1].1, 3..4);
        assert_eq!(tokens[2].1, 5..6);
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("a $ b").unwrap_err();
        assert_eq!(err.position, 2);
    }
}
