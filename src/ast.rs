/// One parsed input line: the argument vector plus where its standard
/// streams go. Redirection operators and their targets never appear in
/// `args`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    pub args: Vec<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub error_file: Option<String>,
    // Shared by stdout and stderr redirection
    pub append: bool,
}

impl Command {
    pub fn new<S: Into<String>>(args: impl IntoIterator<Item = S>) -> Self {
        Command {
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }

    pub fn has_redirects(&self) -> bool {
        self.input_file.is_some() || self.output_file.is_some() || self.error_file.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdin,
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectOp {
    pub stream: Stream,
    pub append: bool,
}

impl RedirectOp {
    /// Recognizes an operator only when it is the whole token.
    pub fn parse(token: &str) -> Option<Self> {
        let (stream, append) = match token {
            "<" => (Stream::Stdin, false),
            ">" | "1>" => (Stream::Stdout, false),
            ">>" | "1>>" => (Stream::Stdout, true),
            "2>" => (Stream::Stderr, false),
            "2>>" => (Stream::Stderr, true),
            _ => return None,
        };
        Some(RedirectOp { stream, append })
    }
}
