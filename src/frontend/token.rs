//! Token definitions for the normalized-English lexer

/// A token produced by the lexer.
///
/// Literal lexemes are kept verbatim (numbers in particular) so the code
/// generator can echo exactly what the user wrote.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal, at most one decimal point
    Number(String),
    /// Identifier, possibly dotted (`math.sqrt`)
    Ident(String),
    /// Quoted string contents, quotes stripped
    Str(String),
    /// Canonicalized `true`
    True,
    /// Canonicalized `false`
    False,
    /// Canonicalized `none`
    NoneLit,

    // ============ Operators ============
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// **
    Power,
    /// ==
    EqEq,
    /// !=
    Ne,
    /// <
    Lt,
    /// <=
    Le,
    /// >
    Gt,
    /// >=
    Ge,
    /// and (keyword operator)
    And,
    /// or (keyword operator)
    Or,
    /// not (keyword operator)
    Not,
    /// = (never valid inside an expression; parse failure feeds the
    /// literal-string fallback)
    Assign,

    // ============ Delimiters ============
    /// (
    LParen,
    /// )
    RParen,
    /// [
    LBracket,
    /// ]
    RBracket,
    /// ,
    Comma,
    /// :
    Colon,

    /// End of input
    Eof,
}

impl Token {
    /// Binding power of a binary operator (for Pratt parsing).
    /// Returns None if this token is not a binary operator.
    pub fn binary_precedence(&self) -> Option<u8> {
        match self {
            // Logical OR (lowest)
            Token::Or => Some(10),

            // Logical AND
            Token::And => Some(20),

            // Equality and comparison
            Token::EqEq | Token::Ne | Token::Lt | Token::Le | Token::Gt | Token::Ge => Some(30),

            // Additive
            Token::Plus | Token::Minus => Some(40),

            // Multiplicative
            Token::Star | Token::Slash | Token::Percent => Some(50),

            // Power (highest, right-associative)
            Token::Power => Some(60),

            _ => None,
        }
    }

    /// Canonicalize a lexed word to a keyword token, if it is one.
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Some(Token::And),
            "or" => Some(Token::Or),
            "not" => Some(Token::Not),
            "true" => Some(Token::True),
            "false" => Some(Token::False),
            "none" => Some(Token::NoneLit),
            _ => None,
        }
    }
}
