use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::core::commands::BUILTIN_NAMES;
use crate::core::env::ExecutableIndex;

/// Collects command-name candidates: the builtin set plus everything on
/// the executable index.
#[derive(Clone)]
pub struct CommandCompleter {
    executables: Arc<Mutex<ExecutableIndex>>,
}

impl CommandCompleter {
    pub fn new(executables: Arc<Mutex<ExecutableIndex>>) -> Self {
        Self { executables }
    }

    /// Case-sensitive prefix matches, sorted and de-duplicated. The
    /// index is rescanned first so executables that appeared after
    /// startup become completable.
    pub fn matches(&self, prefix: &str) -> Vec<String> {
        let mut names: BTreeSet<String> =
            BUILTIN_NAMES.iter().map(|name| name.to_string()).collect();

        if let Ok(mut index) = self.executables.lock() {
            index.rescan();
            names.extend(index.names().map(String::from));
        }

        names
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect()
    }
}

/// What a completion request should do to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionAction {
    /// Replace the word under the cursor with this text.
    Insert(String),
    /// No visible change yet; ring the terminal bell.
    Bell,
    /// Show every candidate.
    List,
    /// Nothing matched.
    NoMatch,
}

/// Tab-repeat state for the multiple-match escalation: extend to the
/// common prefix, then bell, then list. Resets whenever the query text
/// changes.
#[derive(Debug, Default, Clone)]
pub struct CompletionState {
    last_query: String,
    repeat_count: u32,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, query: &str, matches: &[String]) -> CompletionAction {
        if self.last_query != query {
            self.last_query = query.to_string();
            self.repeat_count = 0;
        }

        match matches {
            [] => CompletionAction::NoMatch,
            [only] => CompletionAction::Insert(format!("{} ", only)),
            _ => {
                let prefix = longest_common_prefix(matches);
                if prefix.len() > query.len() {
                    CompletionAction::Insert(prefix)
                } else if self.repeat_count == 0 {
                    self.repeat_count += 1;
                    CompletionAction::Bell
                } else {
                    CompletionAction::List
                }
            }
        }
    }
}

fn longest_common_prefix(strings: &[String]) -> String {
    let mut prefix = match strings.first() {
        Some(first) => first.clone(),
        None => return String::new(),
    };

    for s in &strings[1..] {
        let mut common = 0;
        for (a, b) in prefix.chars().zip(s.chars()) {
            if a != b {
                break;
            }
            common += a.len_utf8();
        }
        prefix.truncate(common);
        if prefix.is_empty() {
            break;
        }
    }

    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_match_completes_with_separator() {
        let mut state = CompletionState::new();
        let action = state.advance("e", &candidates(&["echo"]));
        assert_eq!(action, CompletionAction::Insert("echo ".to_string()));
    }

    #[test]
    fn test_common_prefix_extends_before_anything_else() {
        let mut state = CompletionState::new();
        let action = state.advance("", &candidates(&["cat", "cd"]));
        assert_eq!(action, CompletionAction::Insert("c".to_string()));
    }

    #[test]
    fn test_bell_once_then_list() {
        let mut state = CompletionState::new();
        let matches = candidates(&["cat", "cd"]);

        assert_eq!(state.advance("c", &matches), CompletionAction::Bell);
        assert_eq!(state.advance("c", &matches), CompletionAction::List);
        // Further repeats keep listing.
        assert_eq!(state.advance("c", &matches), CompletionAction::List);
    }

    #[test]
    fn test_state_resets_when_query_changes() {
        let mut state = CompletionState::new();
        let matches = candidates(&["cat", "cd"]);

        assert_eq!(state.advance("c", &matches), CompletionAction::Bell);
        state.advance("x", &[]);
        assert_eq!(state.advance("c", &matches), CompletionAction::Bell);
    }

    #[test]
    fn test_no_candidates_is_no_match() {
        let mut state = CompletionState::new();
        assert_eq!(state.advance("zz", &[]), CompletionAction::NoMatch);
    }

    #[test]
    fn test_longest_common_prefix() {
        assert_eq!(longest_common_prefix(&candidates(&["cat", "cd"])), "c");
        assert_eq!(
            longest_common_prefix(&candidates(&["history", "hist"])),
            "hist"
        );
        assert_eq!(longest_common_prefix(&candidates(&["a", "b"])), "");
        assert_eq!(longest_common_prefix(&[]), "");
    }
}
