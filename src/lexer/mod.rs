mod lexer;
mod token;

use thiserror::Error;

pub use lexer::{Lexer, LexerLimits};
pub use token::Token;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("unterminated quote {0} starting at position {1}")]
    UnterminatedQuote(char, usize),
    #[error("trailing backslash at position {0}")]
    TrailingEscape(usize),
    #[error("too many tokens (limit is {limit})")]
    TooManyTokens { limit: usize },
    #[error("token starting at position {pos} exceeds {limit} characters")]
    TokenTooLong { limit: usize, pos: usize },
}

/// Tokenizes `line` with the default limits.
pub fn tokenize(line: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(line).tokenize()
}
