use std::io::Write;
use std::path::Path;

use super::{Builtin, CommandError};
use crate::core::session::Session;

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }

    /// Prints the last `n` entries, numbered from 1 across the whole
    /// store. An omitted or unparsable count means everything — which is
    /// also where a `-r/-w/-a` flag missing its filename ends up.
    fn show_recent(
        &self,
        session: &Session,
        args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let history = session.history();
        let total = history.len();
        let count = args
            .first()
            .and_then(|arg| arg.parse::<usize>().ok())
            .unwrap_or(total);
        let start = total.saturating_sub(count);

        for (i, entry) in history.entries().iter().enumerate().skip(start) {
            writeln!(sink, "{}  {}", i + 1, entry)?;
        }
        Ok(())
    }
}

impl Builtin for HistoryCommand {
    fn run(
        &self,
        session: &mut Session,
        args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match (args.first().map(String::as_str), args.get(1)) {
            (Some("-r"), Some(file)) => {
                if let Err(e) = session.history_mut().load_from(Path::new(file)) {
                    writeln!(sink, "history: cannot read file {}: {}", file, e)?;
                }
                Ok(())
            }
            (Some("-w"), Some(file)) => {
                if let Err(e) = session.history().save_to(Path::new(file)) {
                    writeln!(sink, "history: cannot write file {}: {}", file, e)?;
                }
                Ok(())
            }
            (Some("-a"), Some(file)) => {
                if let Err(e) = session.history_mut().append_since_checkpoint(Path::new(file)) {
                    writeln!(sink, "history: cannot append file {}: {}", file, e)?;
                }
                Ok(())
            }
            _ => self.show_recent(session, args, sink),
        }
    }
}
