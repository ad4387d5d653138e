//! Edit command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::types::RecordPayload;

/// Command to change one field of an existing record.
pub struct EditCommand;

impl Command for EditCommand {
    fn name(&self) -> &str {
        "edit"
    }

    fn aliases(&self) -> &[&str] {
        &["update"]
    }

    fn description(&self) -> &str {
        "Change one field of a record"
    }

    fn usage(&self) -> &str {
        "edit <title-or-id> <field> [value]"
    }

    fn help(&self) -> &str {
        "Update a single field of an owned record. The other fields keep\n\
         their current values.\n\n\
         Arguments:\n  \
           <title-or-id> - Exact title of an owned record, or its id\n  \
           <field>       - One of: title, username, url, password\n  \
           [value]       - New value; for password, prompted for if omitted\n\n\
         Examples:\n  \
           edit github username newname\n  \
           edit 42 password"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }
        if args.len() < 2 {
            return CommandResult::error(format!(
                "Usage: {}\nMissing required arguments",
                self.usage()
            ));
        }

        let id = match ctx.resolve_record(args[0]) {
            Ok(id) => id,
            Err(message) => return CommandResult::error(message),
        };
        let field = args[1];

        let value = if args.len() > 2 {
            args[2..].join(" ")
        } else if field == "password" {
            match rpassword::prompt_password("New record password: ") {
                Ok(p) => p,
                Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
            }
        } else {
            return CommandResult::error(format!("Usage: {}\nMissing value", self.usage()));
        };

        // Fetch the record first so unchanged fields are sent back as-is
        ctx.perform(Request::FetchRecord(id));
        if let Some(message) = ctx.store.records.error.clone() {
            return CommandResult::error(message);
        }
        let existing = match &ctx.store.records.current {
            Some(record) => record.clone(),
            None => return CommandResult::error(format!("Record {} not found", id)),
        };

        let old_title = existing.title.clone();
        let mut payload = RecordPayload {
            title: existing.title,
            username: existing.username,
            password: existing.password,
            url: existing.url,
        };
        match field {
            "title" => payload.title = value,
            "username" => payload.username = value,
            "url" => payload.url = value,
            "password" => payload.password = value,
            other => {
                return CommandResult::error(format!(
                    "Unknown field '{}'. Expected title, username, url or password.",
                    other
                ));
            }
        }

        ctx.perform(Request::UpdateRecord(id, payload));

        if let Some(message) = ctx.store.records.error.clone() {
            return CommandResult::error(message);
        }

        if field == "title" {
            ctx.title_trie.remove(&old_title);
            if let Some(record) = ctx.store.records.find(id) {
                let title = record.title.clone();
                ctx.title_trie.insert(&title);
            }
        }
        log::info!("Updated {} of record {}", field, id);
        CommandResult::success(format!("Updated {}", field))
    }

    fn completions(&self, arg_index: usize, partial: &str, ctx: &ShellContext) -> Vec<String> {
        match arg_index {
            0 => ctx.title_trie.completions(partial),
            1 => ["title", "username", "url", "password"]
                .iter()
                .filter(|f| f.starts_with(partial))
                .map(|f| f.to_string())
                .collect(),
            _ => vec![],
        }
    }

    fn min_args(&self) -> usize {
        2
    }
}
