//! Help command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to display help information.
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["h", "?"]
    }

    fn description(&self) -> &str {
        "Display help information"
    }

    fn usage(&self) -> &str {
        "help [command]"
    }

    fn help(&self) -> &str {
        "Display help information about commands.\n\n\
         Without arguments, lists all available commands.\n\
         With a command name, shows detailed help for that command.\n\n\
         Examples:\n  \
           help\n  \
           help share\n  \
           ? list"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let registry = match ctx.registry {
            Some(r) => r,
            None => {
                return CommandResult::error("Help not available (no registry)");
            }
        };

        if args.is_empty() {
            let mut output = String::from("Available commands:\n\n");

            let mut commands: Vec<_> = registry.commands().collect();
            commands.sort_by_key(|c| c.name());

            for cmd in commands {
                let aliases = cmd.aliases();
                let alias_str = if aliases.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", aliases.join(", "))
                };

                output.push_str(&format!(
                    "  {:<16}{} - {}\n",
                    cmd.name(),
                    alias_str,
                    cmd.description()
                ));
            }

            output.push_str("\nType 'help <command>' for detailed help on a specific command.");

            CommandResult::success(output)
        } else {
            let cmd_name = args[0];

            match registry.get(cmd_name) {
                Some(cmd) => {
                    let aliases = cmd.aliases();
                    let alias_str = if aliases.is_empty() {
                        String::new()
                    } else {
                        format!("\nAliases: {}", aliases.join(", "))
                    };

                    let output = format!(
                        "{}\n\nUsage: {}{}\n\n{}",
                        cmd.name().to_uppercase(),
                        cmd.usage(),
                        alias_str,
                        cmd.help()
                    );

                    CommandResult::success(output)
                }
                None => CommandResult::error(format!(
                    "Unknown command: '{}'\nType 'help' to see available commands.",
                    cmd_name
                )),
            }
        }
    }

    fn completions(&self, arg_index: usize, partial: &str, ctx: &ShellContext) -> Vec<String> {
        if arg_index == 0 {
            if let Some(registry) = ctx.registry {
                registry.completions(partial)
            } else {
                vec![]
            }
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        0
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
