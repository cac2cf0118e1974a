//! Frontend: normalization, lexing and parsing of plain-English lines

pub mod ast;
pub mod expr;
pub mod lexer;
pub mod normalize;
pub mod rules;
pub mod token;
