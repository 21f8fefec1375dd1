use tracing::debug;

use crate::ast::{Command, RedirectOp, Stream};
use crate::lexer::Token;
use crate::parser::{ParseError, Parser};

pub struct DefaultParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> DefaultParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect_target(&mut self, operator: &Token) -> Result<String, ParseError> {
        match self.next() {
            Some(tok) => Ok(tok.text.clone()),
            None => Err(ParseError::MissingRedirectTarget {
                operator: operator.text.clone(),
                pos: operator.span.0,
            }),
        }
    }
}

impl<'a> Parser for DefaultParser<'a> {
    fn parse(&mut self) -> Result<Command, ParseError> {
        let mut cmd = Command::default();

        while let Some(tok) = self.next() {
            // A quoted or escaped operator is an ordinary word
            let op = if tok.quoted { None } else { RedirectOp::parse(&tok.text) };
            let Some(op) = op else {
                cmd.args.push(tok.text.clone());
                continue;
            };

            let target = self.expect_target(tok)?;
            match op.stream {
                Stream::Stdin => cmd.input_file = Some(target),
                Stream::Stdout => {
                    cmd.output_file = Some(target);
                    cmd.append = op.append;
                }
                Stream::Stderr => {
                    cmd.error_file = Some(target);
                    cmd.append = op.append;
                }
            }
        }

        debug!(?cmd, "parsed command");
        Ok(cmd)
    }
}
