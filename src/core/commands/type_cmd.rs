use std::io::Write;

use super::{is_builtin, Builtin, CommandError};
use crate::core::session::Session;

#[derive(Clone, Default)]
pub struct TypeCommand;

impl TypeCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for TypeCommand {
    fn run(
        &self,
        session: &mut Session,
        args: &[String],
        sink: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let name = match args.first() {
            Some(name) => name,
            None => {
                writeln!(sink, "type: missing file operand")?;
                return Ok(());
            }
        };

        if is_builtin(name) {
            writeln!(sink, "{} is a shell builtin", name)?;
            return Ok(());
        }

        let index = session
            .executables()
            .lock()
            .map_err(|_| CommandError::ExecutionError("executable index lock poisoned".to_string()))?;

        match index.resolve(name) {
            Some(path) => writeln!(sink, "{} is {}", name, path.display())?,
            None => writeln!(sink, "{}: not found", name)?,
        }
        Ok(())
    }
}
