use std::collections::BTreeMap;
use std::io::Write;

mod cd;
mod echo;
mod exit;
mod history;
mod pwd;
mod type_cmd;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use exit::ExitCommand;
pub use history::HistoryCommand;
pub use pwd::PwdCommand;
pub use type_cmd::TypeCommand;

use crate::core::session::Session;
use crate::process::ProcessError;

/// Every builtin name, kept in sync with `BuiltinRegistry::new`.
pub const BUILTIN_NAMES: [&str; 6] = ["cd", "echo", "exit", "history", "pwd", "type"];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}

#[derive(Debug)]
pub enum CommandError {
    NotFound(String),
    ExecutionError(String),
    IoError(std::io::Error),
    ProcessError(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NotFound(cmd) => write!(f, "{}: command not found", cmd),
            CommandError::ExecutionError(msg) => write!(f, "execution error: {}", msg),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::ProcessError(err) => write!(f, "{}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

/// A command implemented inside the shell process.
///
/// Builtins execute synchronously against the session and emit their
/// output through `sink`, which the caller points at stdout, a redirect
/// target, or a pipeline stage.
pub trait Builtin {
    fn run(
        &self,
        session: &mut Session,
        args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum BuiltinCommand {
    Cd(CdCommand),
    Echo(EchoCommand),
    Exit(ExitCommand),
    History(HistoryCommand),
    Pwd(PwdCommand),
    Type(TypeCommand),
}

impl Builtin for BuiltinCommand {
    fn run(
        &self,
        session: &mut Session,
        args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match self {
            BuiltinCommand::Cd(cmd) => cmd.run(session, args, sink),
            BuiltinCommand::Echo(cmd) => cmd.run(session, args, sink),
            BuiltinCommand::Exit(cmd) => cmd.run(session, args, sink),
            BuiltinCommand::History(cmd) => cmd.run(session, args, sink),
            BuiltinCommand::Pwd(cmd) => cmd.run(session, args, sink),
            BuiltinCommand::Type(cmd) => cmd.run(session, args, sink),
        }
    }
}

/// Dispatch table for the builtin command set.
pub struct BuiltinRegistry {
    commands: BTreeMap<&'static str, BuiltinCommand>,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", BuiltinCommand::Cd(CdCommand::new()));
        commands.insert("echo", BuiltinCommand::Echo(EchoCommand::new()));
        commands.insert("exit", BuiltinCommand::Exit(ExitCommand::new()));
        commands.insert("history", BuiltinCommand::History(HistoryCommand::new()));
        commands.insert("pwd", BuiltinCommand::Pwd(PwdCommand::new()));
        commands.insert("type", BuiltinCommand::Type(TypeCommand::new()));

        BuiltinRegistry { commands }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn run(
        &self,
        name: &str,
        session: &mut Session,
        args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match self.commands.get(name) {
            Some(command) => command.run(session, args, sink),
            None => Err(CommandError::NotFound(name.to_string())),
        }
    }
}
