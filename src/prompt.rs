use std::io::{self, BufRead, Write};

pub struct ShellPrompt {
    text: String,
}

impl ShellPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        ShellPrompt { text: text.into() }
    }

    pub fn show_prompt(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", self.text)?;
        stdout.flush()
    }

    /// Reads one line without its line terminator. `None` at end of input.
    /// Invalid UTF-8 is replaced with U+FFFD.
    pub fn read_line<R: BufRead>(&self, input: &mut R) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let bytes_read = input.read_until(b'\n', &mut buf)?;
        if bytes_read == 0 {
            // EOF (e.g., Ctrl-D)
            println!();
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_only_terminator() {
        let prompt = ShellPrompt::new("$ ");
        let mut input = Cursor::new("echo 'a '  \r\nsecond");
        assert_eq!(prompt.read_line(&mut input).unwrap().as_deref(), Some("echo 'a '  "));
        assert_eq!(prompt.read_line(&mut input).unwrap().as_deref(), Some("second"));
        assert_eq!(prompt.read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_line_replaces_invalid_utf8() {
        let prompt = ShellPrompt::new("$ ");
        let mut input = Cursor::new(&b"ok\n\xff\xfe\nnext\n"[..]);
        assert_eq!(prompt.read_line(&mut input).unwrap().as_deref(), Some("ok"));
        assert_eq!(prompt.read_line(&mut input).unwrap().as_deref(), Some("\u{FFFD}\u{FFFD}"));
        assert_eq!(prompt.read_line(&mut input).unwrap().as_deref(), Some("next"));
    }
}
