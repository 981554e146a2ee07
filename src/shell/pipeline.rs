use std::fs::File;
use std::io::{self, Write};
use std::os::unix::io::FromRawFd;
use std::process::{Child, Command, Stdio};

use crate::{
    core::{commands::BuiltinRegistry, session::Session},
    error::ShellError,
    parser::{self, ParsedCommand},
    process::signal,
};

use super::executor::{open_sink, redirect_files};

/// Runs an ordered list of two or more pipeline stages, each stage's
/// output feeding the next stage's input, then waits for every spawned
/// child in spawn order.
///
/// Builtin stages run synchronously during construction, writing into an
/// anonymous pipe whose read end becomes the next stage's stdin; closing
/// the write end before moving on is what lets the downstream reader see
/// EOF. Builtins never read from the pipeline, so an incoming read end
/// is dropped. Interior redirects parse but are ignored; the final
/// stage's redirect is honored like a single command's.
pub(crate) fn run(
    session: &mut Session,
    registry: &BuiltinRegistry,
    stages: &[String],
) -> Result<(), ShellError> {
    let mut children: Vec<Child> = Vec::new();
    let mut prev: Option<Stdio> = None;

    for (i, raw) in stages.iter().enumerate() {
        let last = i + 1 == stages.len();

        let tokens = match parser::tokenize(raw) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("{}", e);
                return Ok(());
            }
        };
        let parsed = match ParsedCommand::from_tokens(tokens) {
            Some(parsed) => parsed,
            None => continue,
        };

        if registry.contains(&parsed.name) {
            prev = None;
            if last {
                let mut sink = open_sink(parsed.redirect.as_ref())?;
                registry.run(&parsed.name, session, &parsed.args, sink.as_mut())?;
            } else {
                let (reader, mut writer) = anonymous_pipe()?;
                registry.run(&parsed.name, session, &parsed.args, &mut writer)?;
                writer.flush()?;
                // EOF for the reader once the write end is gone
                drop(writer);
                prev = Some(Stdio::from(reader));
            }
        } else {
            let stdin = prev.take().unwrap_or_else(Stdio::inherit);
            let mut command = Command::new(&parsed.name);
            command.args(&parsed.args).stdin(stdin);

            if last {
                let (stdout, stderr) = redirect_files(parsed.redirect.as_ref())?;
                if let Some(file) = stdout {
                    command.stdout(Stdio::from(file));
                }
                if let Some(file) = stderr {
                    command.stderr(Stdio::from(file));
                }
            } else {
                command.stdout(Stdio::piped());
            }

            let mut child = match command.spawn() {
                Ok(child) => child,
                Err(e) => {
                    if e.kind() == io::ErrorKind::NotFound {
                        eprintln!("{}: command not found", parsed.name);
                        return Ok(());
                    }
                    return Err(e.into());
                }
            };

            if !last {
                prev = child.stdout.take().map(Stdio::from);
            }
            children.push(child);
        }
    }

    signal::defer_sigint_to_child()?;
    for mut child in children {
        if let Err(e) = child.wait() {
            eprintln!("murex: failed to wait on child: {}", e);
        }
    }
    Ok(())
}

fn anonymous_pipe() -> io::Result<(File, File)> {
    let mut fds: [libc::c_int; 2] = [0; 2];
    // SAFETY: fds is a valid two-element buffer for pipe(2).
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: both descriptors were just created and belong to us.
    Ok(unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, path::PathBuf};

    fn temp_file(label: &str) -> PathBuf {
        env::temp_dir().join(format!("murex_pipe_{}_{}", std::process::id(), label))
    }

    fn fixture() -> (Session, BuiltinRegistry) {
        (Session::new(None), BuiltinRegistry::new())
    }

    fn stages(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtin_output_feeds_external_stage() {
        let (mut session, registry) = fixture();
        let path = temp_file("builtin_to_cat");

        run(
            &mut session,
            &registry,
            &stages(&["echo pipeline bytes", &format!("cat > {}", path.display())]),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "pipeline bytes\n");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_external_stages_chain() {
        let (mut session, registry) = fixture();
        let path = temp_file("seq_tail");

        run(
            &mut session,
            &registry,
            &stages(&["seq 1 3", &format!("tail -n 1 > {}", path.display())]),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "3\n");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_final_builtin_stage_honors_redirect() {
        let (mut session, registry) = fixture();
        let path = temp_file("type_redirect");

        run(
            &mut session,
            &registry,
            &stages(&["echo probe", &format!("type echo > {}", path.display())]),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "echo is a shell builtin\n"
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_three_stage_mixed_pipeline() {
        let (mut session, registry) = fixture();
        let path = temp_file("three_stage");

        run(
            &mut session,
            &registry,
            &stages(&[
                "echo alpha beta",
                "cat",
                &format!("cat > {}", path.display()),
            ]),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "alpha beta\n");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_command_aborts_without_error() {
        let (mut session, registry) = fixture();

        let result = run(
            &mut session,
            &registry,
            &stages(&["echo hi", "murex_absent_stage_cmd"]),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_interior_redirect_is_ignored() {
        let (mut session, registry) = fixture();
        let ignored = temp_file("interior_ignored");
        let sink = temp_file("interior_sink");
        let _ = fs::remove_file(&ignored);

        run(
            &mut session,
            &registry,
            &stages(&[
                &format!("echo carried > {}", ignored.display()),
                &format!("cat > {}", sink.display()),
            ]),
        )
        .unwrap();

        // Interior stage output went down the pipe, not into its target.
        assert!(!ignored.exists());
        assert_eq!(fs::read_to_string(&sink).unwrap(), "carried\n");
        fs::remove_file(sink).unwrap();
    }
}
