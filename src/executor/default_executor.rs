use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::ast::Command;
use crate::executor::builtin::{BuiltinContext, BuiltinManager};
use crate::executor::path_resolver::PathResolver;
use crate::executor::redirect::RedirectFiles;
use crate::executor::spawn::spawn;
use crate::executor::{ExecError, ExecOutcome, ExecStatus, Executor};

/// Runs builtins in-process and everything else as a child process.
pub struct DefaultExecutor {
    builtins: BuiltinManager,
    resolver: PathResolver,
}

impl DefaultExecutor {
    pub fn new() -> Self {
        DefaultExecutor {
            builtins: BuiltinManager::new(),
            resolver: PathResolver,
        }
    }

    pub fn builtins(&self) -> &BuiltinManager {
        &self.builtins
    }

    fn exec_builtin(&self, cmd: &Command) -> ExecStatus {
        let (mut out, mut err) = RedirectFiles::open(cmd)?.into_writers();
        let mut ctx = BuiltinContext {
            out: &mut *out,
            err: &mut *err,
            builtins: &self.builtins,
            resolver: &self.resolver,
        };
        let status = self.builtins.execute(&cmd.args, &mut ctx);
        out.flush()?;
        err.flush()?;
        status
    }

    fn exec_external(&self, path: &Path, cmd: &Command) -> ExecStatus {
        let stdio = RedirectFiles::open(cmd)?;
        let child = spawn(path, &cmd.args, &stdio)?;
        // The child holds its own copies now
        drop(stdio);
        let code = child.wait()?;
        Ok(ExecOutcome::Code(code))
    }
}

impl Default for DefaultExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for DefaultExecutor {
    fn exec(&mut self, cmd: &Command) -> ExecStatus {
        let Some(name) = cmd.name() else {
            // Nothing to run, but `> file` still creates or truncates file
            RedirectFiles::open(cmd)?;
            return Ok(ExecOutcome::Code(0));
        };

        if self.builtins.is_builtin(name) {
            debug!(name, "running builtin");
            return self.exec_builtin(cmd);
        }

        match self.resolver.resolve(name) {
            Some(path) => {
                debug!(name, path = %path.display(), "running external command");
                self.exec_external(&path, cmd)
            }
            None => Err(ExecError::CommandNotFound(name.to_string())),
        }
    }
}
