use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::{
    core::{commands::BuiltinRegistry, session::Session},
    error::ShellError,
    parser::{self, ParsedCommand, Redirect, RedirectMode, RedirectStream},
    process::ProcessExecutor,
};

use super::pipeline;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<(), ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> Result<(), ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        // Every non-blank submitted line is recorded before anything
        // runs, parse errors included.
        self.session.history_mut().append(line);

        if let Some(stages) = parser::split_pipeline(line) {
            return pipeline::run(&mut self.session, &self.registry, &stages);
        }

        let tokens = parser::tokenize(line)?;
        let parsed = match ParsedCommand::from_tokens(tokens) {
            Some(parsed) => parsed,
            None => return Ok(()),
        };

        run_single(&mut self.session, &self.registry, &parsed)
    }
}

/// Executes one non-pipeline command: builtin, external, or not found.
pub(crate) fn run_single(
    session: &mut Session,
    registry: &BuiltinRegistry,
    command: &ParsedCommand,
) -> Result<(), ShellError> {
    if registry.contains(&command.name) {
        let mut sink = open_sink(command.redirect.as_ref())?;
        registry.run(&command.name, session, &command.args, sink.as_mut())?;
        return Ok(());
    }

    let program = {
        let index = session.executables().lock().map_err(|_| {
            ShellError::Io(io::Error::other("executable index lock poisoned"))
        })?;
        index.resolve(&command.name).map(Path::to_path_buf)
    };

    match program {
        Some(path) => {
            let (stdout, stderr) = redirect_files(command.redirect.as_ref())?;
            ProcessExecutor::new().run(&command.name, &path, &command.args, stdout, stderr)?;
            Ok(())
        }
        None => {
            let mut sink = open_sink(command.redirect.as_ref())?;
            writeln!(sink, "{}: command not found", command.name)?;
            Ok(())
        }
    }
}

/// Opens the output sink selected by the redirect. A stderr-stream
/// redirect touches the target file and routes output to the process's
/// stderr, since builtins emit no stderr traffic of their own.
pub(crate) fn open_sink(redirect: Option<&Redirect>) -> io::Result<Box<dyn Write>> {
    match redirect {
        None => Ok(Box::new(io::stdout())),
        Some(redirect) => {
            let file = open_redirect_file(redirect)?;
            match redirect.stream {
                RedirectStream::Stdout => Ok(Box::new(file)),
                RedirectStream::Stderr => Ok(Box::new(io::stderr())),
            }
        }
    }
}

/// Maps a redirect onto the (stdout, stderr) files for an external
/// command; streams without a redirect stay inherited.
pub(crate) fn redirect_files(
    redirect: Option<&Redirect>,
) -> io::Result<(Option<File>, Option<File>)> {
    match redirect {
        None => Ok((None, None)),
        Some(redirect) => {
            let file = open_redirect_file(redirect)?;
            match redirect.stream {
                RedirectStream::Stdout => Ok((Some(file), None)),
                RedirectStream::Stderr => Ok((None, Some(file))),
            }
        }
    }
}

fn open_redirect_file(redirect: &Redirect) -> io::Result<File> {
    match redirect.mode {
        RedirectMode::Truncate => File::create(&redirect.target),
        RedirectMode::Append => OpenOptions::new()
            .append(true)
            .create(true)
            .open(&redirect.target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, path::PathBuf};

    fn temp_file(label: &str) -> PathBuf {
        env::temp_dir().join(format!("murex_exec_{}_{}", std::process::id(), label))
    }

    fn parse(line: &str) -> ParsedCommand {
        ParsedCommand::from_tokens(parser::tokenize(line).unwrap()).unwrap()
    }

    fn fixture() -> (Session, BuiltinRegistry) {
        (Session::new(None), BuiltinRegistry::new())
    }

    #[test]
    fn test_builtin_output_redirects_to_file() {
        let (mut session, registry) = fixture();
        let path = temp_file("echo_redirect");

        let command = parse(&format!("echo redirected words > {}", path.display()));
        run_single(&mut session, &registry, &command).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "redirected words\n");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_append_redirect_accumulates() {
        let (mut session, registry) = fixture();
        let path = temp_file("echo_append");
        let _ = fs::remove_file(&path);

        let first = parse(&format!("echo one >> {}", path.display()));
        let second = parse(&format!("echo two >> {}", path.display()));
        run_single(&mut session, &registry, &first).unwrap();
        run_single(&mut session, &registry, &second).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_stderr_redirect_touches_file_but_captures_nothing() {
        let (mut session, registry) = fixture();
        let path = temp_file("stderr_touch");
        fs::write(&path, "stale contents").unwrap();

        let command = parse(&format!("echo visible 2> {}", path.display()));
        run_single(&mut session, &registry, &command).unwrap();

        // Truncated by the redirect, left empty by the builtin.
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_unknown_command_reports_to_the_active_sink() {
        let (mut session, registry) = fixture();
        let path = temp_file("not_found");

        let command = parse(&format!("murex_absent_cmd > {}", path.display()));
        run_single(&mut session, &registry, &command).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "murex_absent_cmd: command not found\n"
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_external_command_with_redirect() {
        let (mut session, registry) = fixture();
        let path = temp_file("external_redirect");

        let command = parse(&format!("ls -d / > {}", path.display()));
        run_single(&mut session, &registry, &command).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "/\n");
        fs::remove_file(path).unwrap();
    }
}
