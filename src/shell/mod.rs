use std::env;
use std::path::PathBuf;

use rustyline::{config::Configurer, history::FileHistory, CompletionType, Editor};

mod executor;
mod pipeline;

use crate::{
    core::{commands::BuiltinRegistry, session::Session},
    error::ShellError,
    flags::Flags,
    input::ShellCompleter,
};

use executor::CommandHandler;

const PROMPT: &str = "$ ";

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) session: Session,
    pub(crate) registry: BuiltinRegistry,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let histfile = flags
            .get_value("histfile")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HISTFILE").map(PathBuf::from));

        let mut session = Session::new(histfile);
        if let Err(e) = session.load_history_file() {
            if !flags.is_set("quiet") {
                eprintln!("Error reading history file: {}", e);
            }
        }

        let completer = ShellCompleter::new(session.executables().clone());
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);
        editor.set_completion_type(CompletionType::List);

        // Keep the shell alive on ctrl-c; rustyline surfaces the
        // interrupt as a readline result.
        ctrlc::set_handler(|| {})?;

        Ok(Shell {
            editor,
            session,
            registry: BuiltinRegistry::new(),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if let Err(e) = self.execute_command(&line) {
                        eprintln!("{}", e);
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    break;
                }
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }
        }

        // End of input flushes the full history before the session ends.
        if let Err(e) = self.session.flush_history() {
            if !self.flags.is_set("quiet") {
                eprintln!("Error writing history file: {}", e);
            }
        }
        Ok(())
    }
}
