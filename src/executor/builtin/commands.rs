use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use nix::errno::Errno;
use tracing::debug;

use crate::executor::builtin::manager::{BuiltinCommand, BuiltinContext};
use crate::executor::{ExecError, ExecOutcome, ExecStatus};

pub struct EchoCommand;

impl BuiltinCommand for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }
    fn run(&self, args: &[String], ctx: &mut BuiltinContext<'_>) -> ExecStatus {
        let words = args.get(1..).unwrap_or_default();
        writeln!(ctx.out, "{}", words.join(" "))?;
        Ok(ExecOutcome::Code(0))
    }
}

/// Only `exit 0` leaves the shell. Any other form is rejected as an
/// unknown command.
pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn run(&self, args: &[String], _ctx: &mut BuiltinContext<'_>) -> ExecStatus {
        match args.get(1).map(String::as_str) {
            Some("0") => Ok(ExecOutcome::Exit),
            _ => Err(ExecError::CommandNotFound(self.name().to_string())),
        }
    }
}

pub struct TypeCommand;

impl BuiltinCommand for TypeCommand {
    fn name(&self) -> &'static str {
        "type"
    }
    fn run(&self, args: &[String], ctx: &mut BuiltinContext<'_>) -> ExecStatus {
        let mut code = 0;
        for name in args.iter().skip(1) {
            if ctx.builtins.is_builtin(name) {
                writeln!(ctx.out, "{} is a shell builtin", name)?;
            } else if let Some(path) = ctx.resolver.resolve(name) {
                writeln!(ctx.out, "{} is {}", name, path.display())?;
            } else {
                writeln!(ctx.out, "{}: not found", name)?;
                code = 1;
            }
        }
        Ok(ExecOutcome::Code(code))
    }
}

pub struct PwdCommand;

impl BuiltinCommand for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }
    fn run(&self, _args: &[String], ctx: &mut BuiltinContext<'_>) -> ExecStatus {
        match env::current_dir() {
            Ok(dir) => {
                writeln!(ctx.out, "{}", dir.display())?;
                Ok(ExecOutcome::Code(0))
            }
            Err(e) => {
                writeln!(ctx.err, "pwd: {}", describe(e))?;
                Ok(ExecOutcome::Code(1))
            }
        }
    }
}

/// `cd`, `cd ~` and `cd ~/dir` are relative to `$HOME`.
pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, args: &[String], ctx: &mut BuiltinContext<'_>) -> ExecStatus {
        let arg = args.get(1).map(String::as_str);
        let target = match arg {
            None | Some("~") => env::var_os("HOME").map(PathBuf::from),
            Some(p) if p.starts_with("~/") => env::var_os("HOME").map(|home| PathBuf::from(home).join(&p[2..])),
            Some(p) => Some(PathBuf::from(p)),
        };
        let Some(target) = target else {
            writeln!(ctx.err, "cd: HOME not set")?;
            return Ok(ExecOutcome::Code(1));
        };

        match env::set_current_dir(&target) {
            Ok(()) => {
                debug!(dir = %target.display(), "changed directory");
                Ok(ExecOutcome::Code(0))
            }
            Err(e) => {
                let shown = arg.map(str::to_string).unwrap_or_else(|| target.display().to_string());
                writeln!(ctx.err, "cd: {}: {}", shown, describe(e))?;
                Ok(ExecOutcome::Code(1))
            }
        }
    }
}

fn describe(e: io::Error) -> String {
    match Errno::try_from(e) {
        Ok(errno) => errno.desc().to_string(),
        Err(e) => e.to_string(),
    }
}
