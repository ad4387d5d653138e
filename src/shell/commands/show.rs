//! Show command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;
use crate::types::PasswordRecord;

/// Command to fetch and display a single record.
pub struct ShowCommand;

fn format_record(record: &PasswordRecord) -> String {
    let mut output = format!(
        "{}\n  id:       {}\n  username: {}\n  password: {}\n  url:      {}",
        OutputHighlighter::title(&record.title),
        record.id,
        record.username,
        OutputHighlighter::secret(&record.password),
        record.url,
    );
    if let Some(owner) = &record.user {
        output.push_str(&format!("\n  owner:    {} <{}>", owner.display_name, owner.email));
    }
    output
}

impl Command for ShowCommand {
    fn name(&self) -> &str {
        "show"
    }

    fn aliases(&self) -> &[&str] {
        &["get", "view"]
    }

    fn description(&self) -> &str {
        "Show one record, including its password"
    }

    fn usage(&self) -> &str {
        "show <title-or-id>"
    }

    fn help(&self) -> &str {
        "Fetch one record from the server and display it in full.\n\n\
         Arguments:\n  \
           <title-or-id> - Exact title of an owned record, or any record id\n\n\
         Examples:\n  \
           show github\n  \
           show 42"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }
        if args.is_empty() {
            return CommandResult::error(format!("Usage: {}\nMissing record", self.usage()));
        }

        let id = match ctx.resolve_record(&args.join(" ")) {
            Ok(id) => id,
            Err(message) => return CommandResult::error(message),
        };

        ctx.perform(Request::FetchRecord(id));

        if let Some(message) = ctx.store.records.error.clone() {
            return CommandResult::error(message);
        }
        match &ctx.store.records.current {
            Some(record) => CommandResult::success(format_record(record)),
            None => CommandResult::error(format!("Record {} not found", id)),
        }
    }

    fn completions(&self, arg_index: usize, partial: &str, ctx: &ShellContext) -> Vec<String> {
        if arg_index == 0 {
            ctx.title_trie.completions(partial)
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        1
    }
}
