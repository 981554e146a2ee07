use std::io::Write;

use super::{Builtin, CommandError};
use crate::core::session::Session;

#[derive(Clone, Default)]
pub struct EchoCommand;

impl EchoCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for EchoCommand {
    fn run(
        &self,
        _session: &mut Session,
        args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        writeln!(sink, "{}", args.join(" "))?;
        Ok(())
    }
}
