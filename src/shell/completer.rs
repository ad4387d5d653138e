//! Trie-based autocomplete for rustyline.
//!
//! Completes command names at the start of the line, and record titles for
//! the commands that take one.

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use std::sync::{Arc, RwLock};

use crate::shell::command::CommandRegistry;
use crate::trie::Trie;

/// Completer that handles both command and argument completion.
pub struct PasslinkCompleter {
    registry: Arc<CommandRegistry>,
    /// Titles of the records last fetched (updated dynamically).
    title_trie: Arc<RwLock<Trie>>,
}

impl PasslinkCompleter {
    pub fn new(registry: Arc<CommandRegistry>, title_trie: Arc<RwLock<Trie>>) -> Self {
        Self {
            registry,
            title_trie,
        }
    }

    fn complete_command(&self, partial: &str) -> Vec<Pair> {
        self.registry
            .completions(partial)
            .into_iter()
            .map(|s| Pair {
                display: s.clone(),
                replacement: s,
            })
            .collect()
    }

    fn complete_title(&self, partial: &str) -> Vec<Pair> {
        match self.title_trie.read() {
            Ok(trie) => trie
                .completions(partial)
                .into_iter()
                .map(|s| Pair {
                    display: s.clone(),
                    replacement: s,
                })
                .collect(),
            Err(_) => vec![],
        }
    }

    /// Parses the input line to determine completion context.
    fn parse_context<'a>(&self, line: &'a str, pos: usize) -> CompletionContext<'a> {
        let line_to_pos = &line[..pos];
        let parts: Vec<&str> = line_to_pos.split_whitespace().collect();

        if parts.is_empty() {
            return CompletionContext::Command { partial: "" };
        }

        let ends_with_space = line_to_pos.ends_with(' ');

        if parts.len() == 1 && !ends_with_space {
            // Still typing the command
            return CompletionContext::Command { partial: parts[0] };
        }

        let command = parts[0];
        let arg_index = if ends_with_space {
            parts.len() - 1
        } else {
            parts.len() - 2
        };
        let partial = if ends_with_space {
            ""
        } else {
            parts.last().unwrap_or(&"")
        };

        CompletionContext::Argument {
            command,
            arg_index,
            partial,
        }
    }
}

/// Context for completion - are we completing a command or an argument?
enum CompletionContext<'a> {
    Command {
        partial: &'a str,
    },
    Argument {
        command: &'a str,
        arg_index: usize,
        partial: &'a str,
    },
}

impl Completer for PasslinkCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let context = self.parse_context(line, pos);

        match context {
            CompletionContext::Command { partial } => {
                let start = pos - partial.len();
                let completions = self.complete_command(partial);
                Ok((start, completions))
            }
            CompletionContext::Argument {
                command,
                arg_index,
                partial,
            } => {
                let completions = match command {
                    // Commands whose first argument is a record title
                    "show" | "get" | "view" | "edit" | "update" | "remove" | "rm" | "delete" => {
                        if arg_index == 0 {
                            self.complete_title(partial)
                        } else {
                            vec![]
                        }
                    }
                    // share/revoke take an email first, then a record
                    "share" | "revoke" => {
                        if arg_index == 1 {
                            self.complete_title(partial)
                        } else {
                            vec![]
                        }
                    }
                    // Help command completes command names
                    "help" | "h" | "?" => {
                        if arg_index == 0 {
                            self.complete_command(partial)
                        } else {
                            vec![]
                        }
                    }
                    _ => vec![],
                };

                let start = pos - partial.len();
                Ok((start, completions))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::register_all;

    fn setup_completer() -> PasslinkCompleter {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        let mut title_trie = Trie::new();
        title_trie.insert("github");
        title_trie.insert("gitlab");
        title_trie.insert("bank");

        PasslinkCompleter::new(Arc::new(registry), Arc::new(RwLock::new(title_trie)))
    }

    #[test]
    fn test_complete_command_partial() {
        let completer = setup_completer();
        let completions = completer.complete_command("lo");

        let displays: Vec<&str> = completions.iter().map(|p| p.display.as_str()).collect();
        assert!(displays.contains(&"login"));
        assert!(displays.contains(&"logout"));
    }

    #[test]
    fn test_complete_title_partial() {
        let completer = setup_completer();
        let completions = completer.complete_title("git");

        assert_eq!(completions.len(), 2);
        let displays: Vec<&str> = completions.iter().map(|p| p.display.as_str()).collect();
        assert!(displays.contains(&"github"));
        assert!(displays.contains(&"gitlab"));
    }

    #[test]
    fn test_parse_context_command() {
        let completer = setup_completer();

        let ctx = completer.parse_context("sh", 2);
        assert!(matches!(ctx, CompletionContext::Command { partial: "sh" }));

        let ctx = completer.parse_context("", 0);
        assert!(matches!(ctx, CompletionContext::Command { partial: "" }));
    }

    #[test]
    fn test_parse_context_argument() {
        let completer = setup_completer();

        let ctx = completer.parse_context("show gi", 7);
        assert!(matches!(
            ctx,
            CompletionContext::Argument {
                command: "show",
                arg_index: 0,
                partial: "gi"
            }
        ));

        let ctx = completer.parse_context("share bob@x.com ", 16);
        assert!(matches!(
            ctx,
            CompletionContext::Argument {
                command: "share",
                arg_index: 1,
                partial: ""
            }
        ));
    }
}
