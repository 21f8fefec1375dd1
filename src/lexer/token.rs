#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,          // Token content with quotes and escapes removed
    pub span: (usize, usize),  // Character range in the input [start, end)
    pub quoted: bool,          // Some part was quoted or escaped
}

impl Token {
    pub fn new(text: impl Into<String>, span: (usize, usize)) -> Self {
        Token {
            text: text.into(),
            span,
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>, span: (usize, usize)) -> Self {
        Token {
            quoted: true,
            ..Token::new(text, span)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
