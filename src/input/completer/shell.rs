use std::borrow::Cow;
use std::io::Write;
use std::sync::{Arc, Mutex};

use super::command::{CommandCompleter, CompletionAction, CompletionState};
use crate::core::env::ExecutableIndex;
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// The rustyline helper: command-name completion with the
/// prefix/bell/list escalation, plus live line highlighting.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    state: Arc<Mutex<CompletionState>>,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(executables: Arc<Mutex<ExecutableIndex>>) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(executables),
            state: Arc::new(Mutex::new(CompletionState::new())),
            highlighter: SyntaxHighlighter::new(),
        }
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();

        if line_up_to_cursor.ends_with(' ') {
            words.push("");
        }

        // Only the command word completes; later words have no
        // candidate set.
        let (start, query) = match words.len() {
            0 => (pos, ""),
            1 => {
                let word = words[0];
                (line_up_to_cursor.rfind(word).unwrap_or(0), word)
            }
            _ => return Ok((pos, Vec::new())),
        };

        let matches = self.command_completer.matches(query);
        let action = match self.state.lock() {
            Ok(mut state) => state.advance(query, &matches),
            Err(_) => return Ok((pos, Vec::new())),
        };

        match action {
            CompletionAction::Insert(text) => Ok((
                start,
                vec![Pair {
                    display: text.clone(),
                    replacement: text,
                }],
            )),
            CompletionAction::Bell => {
                ring_bell();
                Ok((start, Vec::new()))
            }
            CompletionAction::List => Ok((
                start,
                matches
                    .into_iter()
                    .map(|name| Pair {
                        display: name.clone(),
                        replacement: name,
                    })
                    .collect(),
            )),
            CompletionAction::NoMatch => Ok((start, Vec::new())),
        }
    }
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
