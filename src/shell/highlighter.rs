//! Syntax and semantic highlighting for the shell.

use rustyline::highlight::{CmdKind, Highlighter};
use std::borrow::Cow;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// ANSI color codes for highlighting.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[37m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

/// Highlighter for shell input with syntax coloring.
pub struct PasslinkHighlighter {
    /// Registry to check for valid commands.
    registry: Arc<CommandRegistry>,
}

impl PasslinkHighlighter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Highlights a line of input.
    fn highlight_line(&self, line: &str) -> String {
        if line.trim().is_empty() {
            return line.to_string();
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            return line.to_string();
        }

        let command = parts[0];
        let is_valid_command = self.registry.get(command).is_some();

        let mut result = String::new();

        let leading_ws = &line[..line.len() - line.trim_start().len()];
        result.push_str(leading_ws);

        if is_valid_command {
            result.push_str(colors::BOLD);
            result.push_str(colors::CYAN);
            result.push_str(command);
            result.push_str(colors::RESET);
        } else {
            result.push_str(colors::RED);
            result.push_str(command);
            result.push_str(colors::RESET);
        }

        let cmd_end = line.find(command).unwrap_or(0) + command.len();
        let rest = &line[cmd_end..];

        if !rest.is_empty() {
            let highlighted_args = self.highlight_arguments(command, rest);
            result.push_str(&highlighted_args);
        }

        result
    }

    /// Highlights command arguments with appropriate colors.
    fn highlight_arguments(&self, command: &str, args_str: &str) -> String {
        let mut result = String::new();
        let parts: Vec<&str> = args_str.split_whitespace().collect();

        let mut pos = 0;
        for (i, part) in parts.iter().enumerate() {
            // Find this part in the string and preserve whitespace
            let part_start = args_str[pos..].find(part).unwrap_or(0) + pos;
            let whitespace = &args_str[pos..part_start];
            result.push_str(whitespace);

            let color = match command {
                // Record title or id argument
                "show" | "get" | "view" | "edit" | "update" | "remove" | "rm" | "delete" => {
                    colors::MAGENTA
                }
                // Credentials never appear on the line, but the email does
                "login" | "register" | "share" | "revoke" | "revoke-all" => {
                    if i == 0 {
                        colors::MAGENTA
                    } else {
                        colors::WHITE
                    }
                }
                // add: title, then username/url
                "add" | "new" => {
                    if i == 0 {
                        colors::MAGENTA
                    } else {
                        colors::DIM
                    }
                }
                "help" | "h" | "?" => colors::YELLOW,
                _ => colors::WHITE,
            };

            result.push_str(color);
            result.push_str(part);
            result.push_str(colors::RESET);

            pos = part_start + part.len();
        }

        if pos < args_str.len() {
            result.push_str(&args_str[pos..]);
        }

        result
    }
}

impl Highlighter for PasslinkHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(format!(
            "{}{}{}{}",
            colors::BOLD,
            colors::BRIGHT_GREEN,
            prompt,
            colors::RESET
        ))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("{}{}{}", colors::DIM, hint, colors::RESET))
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        _completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        Cow::Owned(format!(
            "{}{}{}",
            colors::BRIGHT_CYAN,
            candidate,
            colors::RESET
        ))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Utilities for semantic highlighting in output.
pub struct OutputHighlighter;

impl OutputHighlighter {
    /// Formats a success message.
    pub fn success(msg: &str) -> String {
        format!("{}{}{}", colors::GREEN, msg, colors::RESET)
    }

    /// Formats an error message.
    pub fn error(msg: &str) -> String {
        format!("{}{}{}", colors::BRIGHT_RED, msg, colors::RESET)
    }

    /// Formats a warning message.
    pub fn warning(msg: &str) -> String {
        format!("{}{}{}", colors::YELLOW, msg, colors::RESET)
    }

    /// Formats a record title.
    pub fn title(name: &str) -> String {
        format!("{}{}{}", colors::MAGENTA, name, colors::RESET)
    }

    /// Formats a secret (dimmed for less visibility).
    pub fn secret(secret: &str) -> String {
        format!("{}{}{}", colors::DIM, secret, colors::RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::register_all;

    fn setup_highlighter() -> PasslinkHighlighter {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        PasslinkHighlighter::new(Arc::new(registry))
    }

    #[test]
    fn test_highlight_valid_command() {
        let highlighter = setup_highlighter();
        let result = highlighter.highlight_line("list");

        assert!(result.contains(colors::CYAN));
        assert!(result.contains(colors::BOLD));
        assert!(result.contains("list"));
    }

    #[test]
    fn test_highlight_invalid_command() {
        let highlighter = setup_highlighter();
        let result = highlighter.highlight_line("frobnicate");

        assert!(result.contains(colors::RED));
        assert!(result.contains("frobnicate"));
    }

    #[test]
    fn test_highlight_with_arguments() {
        let highlighter = setup_highlighter();
        let result = highlighter.highlight_line("show github");

        assert!(result.contains(colors::CYAN)); // command
        assert!(result.contains(colors::MAGENTA)); // title
    }

    #[test]
    fn test_output_highlighter_error() {
        let result = OutputHighlighter::error("Failed!");
        assert!(result.contains(colors::BRIGHT_RED));
        assert!(result.contains("Failed!"));
    }

    #[test]
    fn test_empty_line() {
        let highlighter = setup_highlighter();
        assert_eq!(highlighter.highlight_line(""), "");
        assert_eq!(highlighter.highlight_line("   "), "   ");
    }
}
