use std::env;
use std::io::Write;

use super::{Builtin, CommandError};
use crate::core::session::Session;

#[derive(Clone, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for PwdCommand {
    fn run(
        &self,
        _session: &mut Session,
        _args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        writeln!(sink, "{}", env::current_dir()?.display())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prints_current_directory() {
        let mut session = Session::new(None);
        let mut sink = Vec::new();

        PwdCommand::new().run(&mut session, &[], &mut sink).unwrap();

        let printed = String::from_utf8(sink).unwrap();
        assert_eq!(
            printed.trim_end(),
            env::current_dir().unwrap().display().to_string()
        );
    }
}
