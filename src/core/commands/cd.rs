use std::env;
use std::io::Write;

use super::{Builtin, CommandError};
use crate::core::session::Session;
use crate::path::PathExpander;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Builtin for CdCommand {
    fn run(
        &self,
        _session: &mut Session,
        args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        // Anything but exactly one argument is silently ignored.
        if args.len() != 1 {
            return Ok(());
        }

        let target = &args[0];
        let expanded = match self.path_expander.expand(target) {
            Ok(path) => path,
            Err(_) => {
                writeln!(sink, "cd: {}: No such file or directory", target)?;
                return Ok(());
            }
        };

        if !expanded.exists() {
            writeln!(sink, "cd: {}: No such file or directory", target)?;
            return Ok(());
        }

        if let Err(e) = env::set_current_dir(&expanded) {
            writeln!(sink, "cd: {}: {}", target, e)?;
        }
        Ok(())
    }
}
