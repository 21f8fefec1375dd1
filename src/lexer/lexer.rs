use tracing::trace;

use super::token::Token;
use super::LexError;

pub const DEFAULT_MAX_TOKENS: usize = 256;
pub const DEFAULT_MAX_TOKEN_LEN: usize = 4096;

/// Capacity limits for a single line. Exceeding either one is an error,
/// never a truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerLimits {
    pub max_tokens: usize,
    pub max_token_len: usize,
}

impl Default for LexerLimits {
    fn default() -> Self {
        LexerLimits {
            max_tokens: DEFAULT_MAX_TOKENS,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    DefaultEscape,     // after `\` outside quotes
    InWord,
    InSingleQuote,
    InDoubleQuote,
    DoubleQuoteEscape, // after `\` inside double quotes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Begin,      // start a token here if none is open
    Push(char),
    End,        // emit the open token, if any
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    next: State,
    action: Action,
    advance: bool,
}

fn go(next: State, action: Action, advance: bool) -> Transition {
    Transition { next, action, advance }
}

/// One step of the quoting state machine. A transition that does not
/// advance hands the same character to `next`.
fn step(state: State, ch: char) -> Transition {
    use State::*;

    match (state, ch) {
        (Default, c) if c.is_whitespace() => go(Default, Action::End, true),
        (Default, '\'') => go(InSingleQuote, Action::Begin, true),
        (Default, '"') => go(InDoubleQuote, Action::Begin, true),
        (Default, '\\') => go(DefaultEscape, Action::Begin, true),
        (Default, c) => go(InWord, Action::Push(c), true),

        (DefaultEscape, c) => go(Default, Action::Push(c), true),

        (InWord, c) if c.is_whitespace() || c == '\\' => go(Default, Action::None, false),
        (InWord, '\'') => go(InSingleQuote, Action::Begin, true),
        (InWord, '"') => go(InDoubleQuote, Action::Begin, true),
        (InWord, c) => go(InWord, Action::Push(c), true),

        (InSingleQuote, '\'') => go(Default, Action::None, true),
        (InSingleQuote, c) => go(InSingleQuote, Action::Push(c), true),

        (InDoubleQuote, '"') => go(Default, Action::None, true),
        (InDoubleQuote, '\\') => go(DoubleQuoteEscape, Action::None, true),
        (InDoubleQuote, c) => go(InDoubleQuote, Action::Push(c), true),

        (DoubleQuoteEscape, c @ ('\\' | '$' | '"' | '\n')) => go(InDoubleQuote, Action::Push(c), true),
        // Not an escapable character: keep the backslash, then reprocess `c`
        (DoubleQuoteEscape, _) => go(InDoubleQuote, Action::Push('\\'), false),
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    limits: LexerLimits,
    tokens: Vec<Token>,
    buf: String,
    buf_chars: usize,
    buf_quoted: bool,
    token_start: Option<usize>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_limits(input, LexerLimits::default())
    }

    pub fn with_limits(input: &'a str, limits: LexerLimits) -> Self {
        Lexer {
            input,
            limits,
            tokens: Vec::new(),
            buf: String::new(),
            buf_chars: 0,
            buf_quoted: false,
            token_start: None,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let chars: Vec<char> = self.input.chars().collect();
        let mut state = State::Default;
        let mut quote_start = 0;
        let mut pos = 0;

        while pos < chars.len() {
            let tr = step(state, chars[pos]);
            let opens_quote = matches!(state, State::Default | State::InWord)
                && matches!(tr.next, State::InSingleQuote | State::InDoubleQuote);
            if opens_quote {
                quote_start = pos;
            }

            match tr.action {
                Action::None => {}
                Action::Begin => {
                    self.begin(pos);
                    self.buf_quoted = true;
                }
                Action::Push(c) => self.push(c, pos)?,
                Action::End => self.end(pos)?,
            }

            state = tr.next;
            if tr.advance {
                pos += 1;
            }
        }

        match state {
            State::Default | State::InWord => self.end(chars.len())?,
            State::InSingleQuote => return Err(LexError::UnterminatedQuote('\'', quote_start)),
            State::InDoubleQuote | State::DoubleQuoteEscape => {
                return Err(LexError::UnterminatedQuote('"', quote_start));
            }
            State::DefaultEscape => return Err(LexError::TrailingEscape(chars.len() - 1)),
        }

        trace!(count = self.tokens.len(), "tokenized line");
        Ok(std::mem::take(&mut self.tokens))
    }

    fn begin(&mut self, pos: usize) {
        if self.token_start.is_none() {
            self.token_start = Some(pos);
        }
    }

    fn push(&mut self, c: char, pos: usize) -> Result<(), LexError> {
        self.begin(pos);
        self.buf.push(c);
        self.buf_chars += 1;
        if self.buf_chars > self.limits.max_token_len {
            return Err(LexError::TokenTooLong {
                limit: self.limits.max_token_len,
                pos: self.token_start.unwrap_or(pos),
            });
        }
        Ok(())
    }

    fn end(&mut self, pos: usize) -> Result<(), LexError> {
        let Some(start) = self.token_start.take() else {
            return Ok(());
        };
        if self.tokens.len() >= self.limits.max_tokens {
            return Err(LexError::TooManyTokens { limit: self.limits.max_tokens });
        }
        let text = std::mem::take(&mut self.buf);
        let token = if self.buf_quoted {
            Token::quoted(text, (start, pos))
        } else {
            Token::new(text, (start, pos))
        };
        self.tokens.push(token);
        self.buf_chars = 0;
        self.buf_quoted = false;
        Ok(())
    }
}
