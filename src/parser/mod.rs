pub mod default;

use thiserror::Error;

use crate::ast::Command;
use crate::lexer::Token;

pub use default::DefaultParser;

pub trait Parser {
    fn parse(&mut self) -> Result<Command, ParseError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing file name after '{operator}' at position {pos}")]
    MissingRedirectTarget { operator: String, pos: usize },
}

pub fn parse(tokens: &[Token]) -> Result<Command, ParseError> {
    DefaultParser::new(tokens).parse()
}
