//! Inline hints as the user types.

use rustyline::Context;
use rustyline::hint::Hinter;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Hinter that provides command usage hints.
pub struct PasslinkHinter {
    registry: Arc<CommandRegistry>,
}

impl PasslinkHinter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Gets a hint for the current input.
    fn get_hint(&self, line: &str) -> Option<String> {
        // Check for trailing space before trimming
        let has_trailing_space = line.ends_with(' ');
        let line = line.trim();

        if line.is_empty() {
            return None;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            return None;
        }

        let command = parts[0];

        // Still typing the command: hint the unique completion
        if parts.len() == 1 && !has_trailing_space {
            let completions = self.registry.completions(command);
            if completions.len() == 1 {
                let completion = &completions[0];
                if completion.starts_with(command) && completion != command {
                    return Some(completion[command.len()..].to_string());
                }
            }
            return None;
        }

        // Show the missing part of the usage string
        if let Some(cmd) = self.registry.get(command) {
            let arg_count = parts.len() - 1;
            if arg_count < cmd.min_args() {
                let usage = cmd.usage();
                if let Some(args_part) = usage.strip_prefix(cmd.name()) {
                    let args_part = args_part.trim();
                    if !args_part.is_empty() {
                        let hint_parts: Vec<&str> = args_part.split_whitespace().collect();
                        if arg_count < hint_parts.len() {
                            let remaining: Vec<&str> = hint_parts[arg_count..].to_vec();
                            return Some(format!(" {}", remaining.join(" ")));
                        }
                    }
                }
            }
        }

        None
    }
}

impl Hinter for PasslinkHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        // Only hint if cursor is at end of line
        if pos < line.len() {
            return None;
        }
        self.get_hint(line)
    }
}
