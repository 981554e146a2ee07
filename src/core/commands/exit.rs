use std::io::Write;

use super::{Builtin, CommandError};
use crate::core::session::Session;

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

fn parse_exit_code(args: &[String]) -> i32 {
    args.first()
        .and_then(|arg| arg.parse::<i32>().ok())
        .unwrap_or(0)
}

impl Builtin for ExitCommand {
    fn run(
        &self,
        session: &mut Session,
        args: &[String],
        _sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        if let Err(e) = session.flush_history() {
            eprintln!("Error writing history file: {}", e);
        }

        std::process::exit(parse_exit_code(args));
    }
}
