use std::io;

use nix::errno::Errno;
use nix::unistd::Pid;
use thiserror::Error;

use crate::ast::Command;

pub type ExecStatus = Result<ExecOutcome, ExecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Code(i32), // keep reading lines
    Exit,      // leave the loop
}

impl ExecOutcome {
    pub fn code(&self) -> i32 {
        match self {
            ExecOutcome::Code(code) => *code,
            ExecOutcome::Exit => 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{0}: command not found")]
    CommandNotFound(String),
    #[error("{path}: {source}")]
    Redirect {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: Errno,
    },
    #[error("failed to wait for process {pid}: {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: Errno,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ExecError {
    /// Status reported for a line that failed before or during execution.
    pub fn status(&self) -> i32 {
        match self {
            ExecError::CommandNotFound(_) => 127,
            _ => 1,
        }
    }
}

pub trait Executor {
    fn exec(&mut self, cmd: &Command) -> ExecStatus;
}
