//! Error handling for plainpy

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ParseError>;

/// Expression-parse failure.
///
/// None of these ever reach the library caller: a failed expression parse
/// means "this text is not an expression", and the statement rules consume
/// that signal by falling back to a literal-string interpretation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, got {got}")]
    UnexpectedToken { expected: String, got: String },

    #[error("expected an expression")]
    ExpectedExpr,

    #[error("trailing input after expression")]
    TrailingTokens,

    #[error("unclosed delimiter: {0}")]
    UnclosedDelimiter(char),
}
