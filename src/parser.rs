//! Recursive-descent parser for boolean expressions.
//!
//! ```text
//! expr       := or
//! or         := xor (('|' | '+' | '∨') or)?
//! xor        := and (('^' | '⊕') xor)?
//! and        := not (('&' | '*' | '∧') and)?
//! not        := ('¬' | '!') not | atom
//! atom       := identifier | '0' | '1' | '(' expr ')'
//! identifier := letter (letter | digit)*
//! ```
//!
//! All binary operators are right-associative, so `a * b * c` parses as
//! `And(a, And(b, c))`. Parentheses are kept as
//! [`Expression::Parenthesized`] nodes.
//!
//! # Example
//!
//! ```
//! use boolalg::expr::Expression;
//! use boolalg::parser::parse;
//!
//! let e = parse("a*b+c").unwrap();
//! let a = Expression::var("a");
//! let b = Expression::var("b");
//! let c = Expression::var("c");
//! assert_eq!(e, Expression::or(Expression::and(a, b), c));
//! ```

use crate::error::ParseError;
use crate::expr::Expression;
use crate::lexer::{tokenize, Spanned, Token};

/// Parses a complete expression. Trailing tokens are an error.
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
    };
    let expr = parser.parse_or()?;
    if let Some((token, span)) = parser.peek() {
        return Err(ParseError::new(
            format!("unexpected {} after end of expression", token),
            span.start,
        ));
    }
    Ok(expr)
}

struct Parser<'src> {
    tokens: Vec<Spanned<'src>>,
    pos: usize,
    end: usize,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> Option<&Spanned<'src>> {
        self.tokens.get(self.pos)
    }

    /// Consumes the next token if it equals `token`.
    fn eat(&mut self, token: Token<'src>) -> bool {
        match self.peek() {
            Some((next, _)) if *next == token => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |(_, span)| span.start)
    }

    fn parse_or(&mut self) -> Result<Expression, ParseError> {
        let lhs = self.parse_xor()?;
        if self.eat(Token::Or) {
            let rhs = self.parse_or()?;
            return Ok(Expression::or(lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_xor(&mut self) -> Result<Expression, ParseError> {
        let lhs = self.parse_and()?;
        if self.eat(Token::Xor) {
            let rhs = self.parse_xor()?;
            return Ok(Expression::xor(lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        let lhs = self.parse_not()?;
        if self.eat(Token::And) {
            let rhs = self.parse_and()?;
            return Ok(Expression::and(lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expression, ParseError> {
        if self.eat(Token::Not) {
            let inner = self.parse_not()?;
            return Ok(Expression::not(inner));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expression, ParseError> {
        let position = self.position();
        let Some((token, _)) = self.peek().cloned() else {
            return Err(ParseError::new(
                "expected identifier, parenthesized, or constant boolean expression, found end of input",
                position,
            ));
        };

        match token {
            Token::Identifier(name) => {
                self.pos += 1;
                Ok(Expression::var(name))
            }
            Token::True => {
                self.pos += 1;
                Ok(Expression::True)
            }
            Token::False => {
                self.pos += 1;
                Ok(Expression::False)
            }
            Token::LeftParen => {
                self.pos += 1;
                let inner = self.parse_or()?;
                if !self.eat(Token::RightParen) {
                    return Err(ParseError::new("expected ')'", self.position()));
                }
                Ok(Expression::parenthesized(inner))
            }
            other => Err(ParseError::new(
                format!(
                    "expected identifier, parenthesized, or constant boolean expression, found {}",
                    other
                ),
                position,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    fn v(name: &str) -> Expression {
        Expression::var(name)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse("a*b+c").unwrap(), (v("a") & v("b")) | v("c"));
        assert_eq!(parse("a+b*c").unwrap(), v("a") | (v("b") & v("c")));
        assert_eq!(parse("a^b*c").unwrap(), v("a") ^ (v("b") & v("c")));
        assert_eq!(parse("a+b^c").unwrap(), v("a") | (v("b") ^ v("c")));
        assert_eq!(parse("!a*b").unwrap(), !v("a") & v("b"));
    }

    #[test]
    fn test_right_associative() {
        assert_eq!(parse("a*b*c").unwrap(), v("a") & (v("b") & v("c")));
        assert_eq!(parse("a+b+c").unwrap(), v("a") | (v("b") | v("c")));
        assert_eq!(parse("a^b^c").unwrap(), v("a") ^ (v("b") ^ v("c")));
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(
            parse("(a+b)*(c+d)").unwrap(),
            Expression::parenthesized(v("a") | v("b")) & Expression::parenthesized(v("c") | v("d"))
        );
        assert_eq!(
            parse("¬(a ∧ b)").unwrap(),
            !Expression::parenthesized(v("a") & v("b"))
        );
    }

    #[test]
    fn test_constants_and_negation() {
        assert_eq!(parse("1").unwrap(), Expression::True);
        assert_eq!(parse("0").unwrap(), Expression::False);
        assert_eq!(parse("!!x").unwrap(), !!v("x"));
        assert_eq!(parse("¬0 ∨ x1").unwrap(), !Expression::False | v("x1"));
    }

    #[test]
    fn test_errors() {
        let err = parse("").unwrap_err();
        assert_eq!(err.position, 0);

        let err = parse("a +").unwrap_err();
        assert_eq!(err.position, 3);

        let err = parse("(a + b").unwrap_err();
        assert_eq!(err.position, 6);
        assert_eq!(err.message, "expected ')'");

        let err = parse("a b").unwrap_err();
        assert_eq!(err.position, 2);

        let err = parse("a * )").unwrap_err();
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_roundtrip_display() {
        for text in ["a * b + c", "a * (b + c)", "¬(a * b)", "¬(¬a)", "a ^ b + c"] {
            let e = parse(text).unwrap();
            assert_eq!(e.to_string(), text);
        }
    }
}
