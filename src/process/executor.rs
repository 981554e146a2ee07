use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{signal, ProcessError};

/// Runs a single external command to completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Spawns `program` with the given arguments and waits for it. The
    /// optional `stdout`/`stderr` files realize an output redirect; the
    /// remaining streams are inherited from the shell.
    ///
    /// The child's exit status is not reported and never alters the
    /// shell's own exit code.
    pub fn run(
        &self,
        name: &str,
        program: &Path,
        args: &[String],
        stdout: Option<File>,
        stderr: Option<File>,
    ) -> Result<(), ProcessError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(stdout.map(Stdio::from).unwrap_or_else(Stdio::inherit))
            .stderr(stderr.map(Stdio::from).unwrap_or_else(Stdio::inherit));

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                if e.kind() == io::ErrorKind::NotFound {
                    return Err(ProcessError::CommandNotFound(name.to_string()));
                }
                return Err(e.into());
            }
        };

        signal::defer_sigint_to_child()?;

        child.wait()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, path::PathBuf};

    fn temp_file(label: &str) -> PathBuf {
        env::temp_dir().join(format!("murex_spawn_{}_{}", std::process::id(), label))
    }

    #[test]
    fn test_redirected_stdout_lands_in_file() {
        let path = temp_file("echo_out");
        let file = File::create(&path).unwrap();

        ProcessExecutor::new()
            .run(
                "echo",
                Path::new("/bin/echo"),
                &["external".to_string()],
                Some(file),
                None,
            )
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "external\n");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_program_is_command_not_found() {
        let result = ProcessExecutor::new().run(
            "ghost",
            Path::new("/nonexistent/ghost"),
            &[],
            None,
            None,
        );

        assert!(matches!(result, Err(ProcessError::CommandNotFound(name)) if name == "ghost"));
    }
}
