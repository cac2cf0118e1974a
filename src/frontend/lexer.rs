//! Lexer for normalized English
//!
//! Converts the normalizer's output into a flat token stream. Lexing is
//! deliberately permissive and never fails: characters that fit no token
//! are silently skipped, so arbitrary input always yields a well-formed,
//! Eof-terminated stream.

use crate::frontend::token::Token;

/// The lexer state
pub struct Lexer {
    /// Input as chars
    source: Vec<char>,
    /// Current position in the input
    pos: usize,
}

impl Lexer {
    /// Create a new lexer for the given (normalized) text
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Read a number literal; accepts at most one decimal point
    fn read_number(&mut self) -> Token {
        let start = self.pos;
        let mut seen_dot = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.'
                && !seen_dot
                && self.peek_next().map_or(false, |n| n.is_ascii_digit())
            {
                seen_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[start..self.pos].iter().collect();
        Token::Number(text)
    }

    /// Read an identifier or keyword operator.
    ///
    /// A `.` extends the identifier only when the next character is
    /// alphabetic, which keeps dotted call targets (`math.sqrt`) together
    /// while leaving a trailing full stop alone.
    fn read_identifier(&mut self) -> Token {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else if c == '.' && self.peek_next().map_or(false, |n| n.is_alphabetic()) {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[start..self.pos].iter().collect();
        Token::keyword_from_str(&text).unwrap_or(Token::Ident(text))
    }

    /// Read a quoted string. Backslash escapes pass through unchanged; an
    /// unterminated quote closes at end of input rather than erroring.
    fn read_string(&mut self, quote: char) -> Token {
        self.advance(); // opening quote

        let mut value = String::new();
        while let Some(c) = self.peek() {
            if c == quote {
                self.advance();
                break;
            } else if c == '\\' {
                self.advance();
                if let Some(escaped) = self.advance() {
                    value.push('\\');
                    value.push(escaped);
                }
            } else {
                value.push(c);
                self.advance();
            }
        }

        Token::Str(value)
    }

    /// Get the next token, skipping anything unrecognizable
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let Some(c) = self.peek() else {
                return Token::Eof;
            };

            if c.is_ascii_digit() {
                return self.read_number();
            }
            if c.is_alphabetic() || c == '_' {
                return self.read_identifier();
            }
            if c == '"' || c == '\'' {
                return self.read_string(c);
            }

            self.advance();
            let token = match c {
                '+' => Some(Token::Plus),
                '-' => Some(Token::Minus),
                '*' => {
                    if self.peek() == Some('*') {
                        self.advance();
                        Some(Token::Power)
                    } else {
                        Some(Token::Star)
                    }
                }
                '/' => Some(Token::Slash),
                '%' => Some(Token::Percent),
                '=' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        Some(Token::EqEq)
                    } else {
                        Some(Token::Assign)
                    }
                }
                '!' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        Some(Token::Ne)
                    } else {
                        // Bare '!' carries no meaning here
                        None
                    }
                }
                '<' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        Some(Token::Le)
                    } else {
                        Some(Token::Lt)
                    }
                }
                '>' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        Some(Token::Ge)
                    } else {
                        Some(Token::Gt)
                    }
                }
                '(' => Some(Token::LParen),
                ')' => Some(Token::RParen),
                '[' => Some(Token::LBracket),
                ']' => Some(Token::RBracket),
                ',' => Some(Token::Comma),
                ':' => Some(Token::Colon),
                // Permissive lexing: drop anything else
                _ => None,
            };

            if let Some(token) = token {
                return token;
            }
        }
    }

    /// Tokenize the entire input, always ending with Eof
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token == Token::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

/// Tokenize normalized text in one call
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("x >= 5");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("x".to_string()),
                Token::Ge,
                Token::Number("5".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_single_decimal_point() {
        let tokens = tokenize("3.14 1.2.3");
        assert_eq!(tokens[0], Token::Number("3.14".to_string()));
        // Second dot does not extend the number
        assert_eq!(tokens[1], Token::Number("1.2".to_string()));
        assert_eq!(tokens[2], Token::Number("3".to_string()));
    }

    #[test]
    fn test_dotted_identifier() {
        let tokens = tokenize("math.sqrt(16)");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("math.sqrt".to_string()),
                Token::LParen,
                Token::Number("16".to_string()),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_trailing_dot_not_consumed() {
        let tokens = tokenize("score.");
        assert_eq!(tokens[0], Token::Ident("score".to_string()));
        assert_eq!(tokens[1], Token::Eof);
    }

    #[test]
    fn test_keyword_operators_and_constants() {
        let tokens = tokenize("a and not b or True none");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_string()),
                Token::And,
                Token::Not,
                Token::Ident("b".to_string()),
                Token::Or,
                Token::True,
                Token::NoneLit,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_both_quotes() {
        let tokens = tokenize(r#""hello" 'world'"#);
        assert_eq!(tokens[0], Token::Str("hello".to_string()));
        assert_eq!(tokens[1], Token::Str("world".to_string()));
    }

    #[test]
    fn test_escape_passthrough() {
        let tokens = tokenize(r#""he said \"hi\"""#);
        assert_eq!(tokens[0], Token::Str(r#"he said \"hi\""#.to_string()));
    }

    #[test]
    fn test_unterminated_string_closes_at_end() {
        let tokens = tokenize("\"never closed");
        assert_eq!(tokens[0], Token::Str("never closed".to_string()));
        assert_eq!(tokens[1], Token::Eof);
    }

    #[test]
    fn test_garbage_is_skipped() {
        let tokens = tokenize("x @#~` + 🙂 1");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("x".to_string()),
                Token::Plus,
                Token::Number("1".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_power_operator() {
        let tokens = tokenize("2 ** 3 * 4");
        assert_eq!(tokens[1], Token::Power);
        assert_eq!(tokens[3], Token::Star);
    }
}
