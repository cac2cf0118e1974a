//! Expression parser
//!
//! Pratt parsing over the token stream. This is the single place
//! arithmetic/logical semantics are defined; every statement rule that
//! needs a value expression goes through [`parse_expression`].
//!
//! Failure here is not an error condition for the translator: callers
//! treat it as "this text is not an expression" and fall back to a
//! literal-string interpretation.

use crate::frontend::ast::{BinOp, Expr, UnOp};
use crate::frontend::token::Token;
use crate::utils::{ParseError, Result};

/// Parse a full token stream as one expression. Trailing unconsumed tokens
/// (other than Eof) are an error.
pub fn parse_expression(tokens: &[Token]) -> Result<Expr> {
    let mut parser = ExprParser { tokens, pos: 0 };
    let expr = parser.parse_bp(0)?;
    if !matches!(parser.current(), Token::Eof) {
        return Err(ParseError::TrailingTokens);
    }
    Ok(expr)
}

struct ExprParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn consume(&mut self, expected: &Token) -> bool {
        if self.current() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token, delim: char) -> Result<()> {
        if self.consume(&expected) {
            Ok(())
        } else {
            Err(ParseError::UnclosedDelimiter(delim))
        }
    }

    /// Parse with binding power (Pratt parsing)
    fn parse_bp(&mut self, min_bp: u8) -> Result<Expr> {
        let mut left = self.parse_prefix()?;

        loop {
            let Some(bp) = self.current().binary_precedence() else {
                break;
            };
            if bp < min_bp {
                break;
            }

            let op_token = self.advance();
            let op = token_to_binop(&op_token)?;

            // Power is right-associative: parse the right operand at a
            // lower binding power so another ** folds to the right.
            let next_bp = if op == BinOp::Pow { bp - 1 } else { bp + 1 };
            let right = self.parse_bp(next_bp)?;

            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        let token = self.current().clone();

        match token {
            Token::Number(text) => {
                self.advance();
                Ok(Expr::Number(text))
            }
            Token::Str(text) => {
                self.advance();
                Ok(Expr::Str(text))
            }
            Token::True => {
                self.advance();
                Ok(Expr::Bool(true))
            }
            Token::False => {
                self.advance();
                Ok(Expr::Bool(false))
            }
            Token::NoneLit => {
                self.advance();
                Ok(Expr::NoneLit)
            }

            Token::Ident(name) => {
                self.advance();

                // Identifier followed by (args) is a call
                if self.consume(&Token::LParen) {
                    let args = self.parse_args()?;
                    self.expect(Token::RParen, ')')?;
                    return Ok(Expr::Call { name, args });
                }

                // Identifier followed by [index] is indexing
                if self.consume(&Token::LBracket) {
                    let index = self.parse_bp(0)?;
                    self.expect(Token::RBracket, ']')?;
                    return Ok(Expr::Index {
                        target: Box::new(Expr::Ident(name)),
                        index: Box::new(index),
                    });
                }

                Ok(Expr::Ident(name))
            }

            // Unary prefix operators. - and + bind between additive and
            // multiplicative; `not` binds between `and` and comparisons.
            Token::Minus => {
                self.advance();
                let operand = self.parse_bp(45)?;
                Ok(Expr::Unary {
                    op: UnOp::Neg,
                    operand: Box::new(operand),
                })
            }
            Token::Plus => {
                self.advance();
                let operand = self.parse_bp(45)?;
                Ok(Expr::Unary {
                    op: UnOp::Pos,
                    operand: Box::new(operand),
                })
            }
            Token::Not => {
                self.advance();
                let operand = self.parse_bp(25)?;
                Ok(Expr::Unary {
                    op: UnOp::Not,
                    operand: Box::new(operand),
                })
            }

            Token::LParen => {
                self.advance();
                let inner = self.parse_bp(0)?;
                self.expect(Token::RParen, ')')?;
                Ok(inner)
            }

            Token::LBracket => {
                self.advance();
                let items = self.parse_items(&Token::RBracket)?;
                self.expect(Token::RBracket, ']')?;
                Ok(Expr::List(items))
            }

            _ => Err(ParseError::ExpectedExpr),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>> {
        self.parse_items(&Token::RParen)
    }

    /// Comma-separated expressions up to (not consuming) a closing token
    fn parse_items(&mut self, close: &Token) -> Result<Vec<Expr>> {
        let mut items = Vec::new();

        while self.current() != close && !matches!(self.current(), Token::Eof) {
            items.push(self.parse_bp(0)?);
            if !self.consume(&Token::Comma) {
                break;
            }
        }

        Ok(items)
    }
}

fn token_to_binop(token: &Token) -> Result<BinOp> {
    match token {
        Token::Plus => Ok(BinOp::Add),
        Token::Minus => Ok(BinOp::Sub),
        Token::Star => Ok(BinOp::Mul),
        Token::Slash => Ok(BinOp::Div),
        Token::Percent => Ok(BinOp::Mod),
        Token::Power => Ok(BinOp::Pow),
        Token::EqEq => Ok(BinOp::Eq),
        Token::Ne => Ok(BinOp::Ne),
        Token::Lt => Ok(BinOp::Lt),
        Token::Le => Ok(BinOp::Le),
        Token::Gt => Ok(BinOp::Gt),
        Token::Ge => Ok(BinOp::Ge),
        Token::And => Ok(BinOp::And),
        Token::Or => Ok(BinOp::Or),
        _ => Err(ParseError::UnexpectedToken {
            expected: "binary operator".to_string(),
            got: format!("{:?}", token),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::tokenize;

    fn parse(text: &str) -> Result<Expr> {
        parse_expression(&tokenize(text))
    }

    #[test]
    fn test_precedence_mul_over_add() {
        let expr = parse("10 + 5 * 2").unwrap();
        // 10 + (5 * 2), never (10 + 5) * 2
        match expr {
            Expr::Binary { left, op, right } => {
                assert_eq!(op, BinOp::Add);
                assert_eq!(*left, Expr::Number("10".to_string()));
                assert!(matches!(*right, Expr::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("expected binary add, got {:?}", other),
        }
    }

    #[test]
    fn test_power_right_associative() {
        let expr = parse("2 ** 3 ** 2").unwrap();
        // 2 ** (3 ** 2)
        match expr {
            Expr::Binary { left, op, right } => {
                assert_eq!(op, BinOp::Pow);
                assert_eq!(*left, Expr::Number("2".to_string()));
                assert!(matches!(*right, Expr::Binary { op: BinOp::Pow, .. }));
            }
            other => panic!("expected power, got {:?}", other),
        }
    }

    #[test]
    fn test_logical_binds_loosest() {
        let expr = parse("x > 1 and y < 2").unwrap();
        assert!(matches!(expr, Expr::Binary { op: BinOp::And, .. }));
    }

    #[test]
    fn test_call_and_index() {
        let expr = parse("math.sqrt(16)").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                name: "math.sqrt".to_string(),
                args: vec![Expr::Number("16".to_string())],
            }
        );

        let expr = parse("scores[0]").unwrap();
        assert!(matches!(expr, Expr::Index { .. }));
    }

    #[test]
    fn test_list_literal() {
        let expr = parse("[1, 2, 3]").unwrap();
        assert_eq!(
            expr,
            Expr::List(vec![
                Expr::Number("1".to_string()),
                Expr::Number("2".to_string()),
                Expr::Number("3".to_string()),
            ])
        );
    }

    #[test]
    fn test_unary_and_parens() {
        let expr = parse("-(3 + 4)").unwrap();
        assert!(matches!(expr, Expr::Unary { op: UnOp::Neg, .. }));

        let expr = parse("not done").unwrap();
        assert!(matches!(expr, Expr::Unary { op: UnOp::Not, .. }));
    }

    #[test]
    fn test_trailing_tokens_fail() {
        assert_eq!(parse("1 + 2 extra"), Err(ParseError::TrailingTokens));
        // Plain English never parses as an expression
        assert!(parse("hello world").is_err());
    }

    #[test]
    fn test_unclosed_delimiters_fail() {
        assert!(parse("f(1, 2").is_err());
        assert!(parse("[1, 2").is_err());
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(parse(""), Err(ParseError::ExpectedExpr));
    }
}
