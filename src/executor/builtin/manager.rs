use std::collections::HashMap;
use std::io::Write;

use crate::executor::builtin::commands::{CdCommand, EchoCommand, ExitCommand, PwdCommand, TypeCommand};
use crate::executor::path_resolver::PathResolver;
use crate::executor::{ExecError, ExecStatus};

/// What a builtin can see while it runs: its (possibly redirected) output
/// streams and the lookup tables `type` reports on.
pub struct BuiltinContext<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub builtins: &'a BuiltinManager,
    pub resolver: &'a PathResolver,
}

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    /// `args[0]` is the builtin's own name.
    fn run(&self, args: &[String], ctx: &mut BuiltinContext<'_>) -> ExecStatus;
}

pub struct BuiltinManager {
    commands: HashMap<String, Box<dyn BuiltinCommand>>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(EchoCommand));
        mgr.register(Box::new(ExitCommand));
        mgr.register(Box::new(TypeCommand));
        mgr.register(Box::new(PwdCommand));
        mgr.register(Box::new(CdCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn execute(&self, args: &[String], ctx: &mut BuiltinContext<'_>) -> ExecStatus {
        let name = args.first().map(String::as_str).unwrap_or_default();
        match self.commands.get(name) {
            Some(cmd) => cmd.run(args, ctx),
            None => Err(ExecError::CommandNotFound(name.to_string())),
        }
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}
