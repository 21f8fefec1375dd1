use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{ExecError, ExecOutcome, Executor};
use crate::lexer::{Lexer, LexerLimits};
use crate::parser;
use crate::prompt::ShellPrompt;

/// Turns lines into commands and hands them to an executor, one at a time.
pub struct Shell<E: Executor> {
    executor: E,
    limits: LexerLimits,
    prompt: ShellPrompt,
    last_status: i32,
}

impl<E: Executor> Shell<E> {
    pub fn new(executor: E, config: &Config) -> Self {
        Shell {
            executor,
            limits: config.lexer_limits(),
            prompt: ShellPrompt::new(config.prompt.clone()),
            last_status: 0,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    /// Tokenizes, parses and runs one line. A blank line runs nothing.
    pub fn eval_line(&mut self, line: &str) -> Result<ExecOutcome, ShellError> {
        let tokens = Lexer::with_limits(line, self.limits).tokenize()?;
        if tokens.is_empty() {
            return Ok(ExecOutcome::Code(self.last_status));
        }
        let cmd = parser::parse(&tokens)?;
        Ok(self.executor.exec(&cmd)?)
    }

    /// Like [`Shell::eval_line`], but reports failures on stderr. Returns
    /// `false` once the shell should stop reading.
    pub fn run_line(&mut self, line: &str) -> bool {
        match self.eval_line(line) {
            Ok(ExecOutcome::Exit) => {
                self.last_status = 0;
                false
            }
            Ok(ExecOutcome::Code(code)) => {
                self.last_status = code;
                true
            }
            Err(e) => {
                debug!(error = ?e, line, "line failed");
                let _ = report_error(&e, &mut io::stderr().lock());
                self.last_status = e.status();
                true
            }
        }
    }

    /// Prompts and evaluates lines until end of input or `exit 0`.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        loop {
            self.prompt.show_prompt()?;
            let Some(line) = self.prompt.read_line(&mut input)? else {
                break;
            };
            if !self.run_line(&line) {
                break;
            }
        }
        Ok(())
    }
}

/// Diagnostics always go to stderr. `command not found` carries no
/// `tinysh:` prefix.
fn report_error(e: &ShellError, w: &mut dyn Write) -> io::Result<()> {
    match e {
        ShellError::Exec(ExecError::CommandNotFound(_)) => writeln!(w, "{}", e),
        _ => writeln!(w, "tinysh: {}", e),
    }
}
