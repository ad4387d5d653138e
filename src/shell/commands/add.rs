//! Add command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::types::RecordPayload;

/// Command to create a new password record.
pub struct AddCommand;

impl Command for AddCommand {
    fn name(&self) -> &str {
        "add"
    }

    fn aliases(&self) -> &[&str] {
        &["new"]
    }

    fn description(&self) -> &str {
        "Create a new password record"
    }

    fn usage(&self) -> &str {
        "add <title> <username> <url> [password]"
    }

    fn help(&self) -> &str {
        "Create a new record on the server.\n\n\
         Arguments:\n  \
           <title>    - Display title for the record\n  \
           <username> - Login name for the site\n  \
           <url>      - Site address\n  \
           [password] - Password; prompted for if omitted\n\n\
         Examples:\n  \
           add github octocat https://github.com\n  \
           add bank alice https://bank.example s3cret"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }
        if args.len() < 3 {
            return CommandResult::error(format!(
                "Usage: {}\nMissing required arguments",
                self.usage()
            ));
        }

        let title = args[0].to_string();
        let username = args[1].to_string();
        let url = args[2].to_string();
        let password = match args.get(3) {
            Some(p) => p.to_string(),
            None => match rpassword::prompt_password("Record password: ") {
                Ok(p) => p,
                Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
            },
        };

        log::debug!("Creating record: {}", title);
        ctx.perform(Request::CreateRecord(RecordPayload {
            title: title.clone(),
            username,
            password,
            url,
        }));

        if let Some(message) = ctx.store.records.error.clone() {
            return CommandResult::error(message);
        }

        ctx.title_trie.insert(&title);
        log::info!("Created record: {}", title);
        CommandResult::success(format!("Added '{}'", title))
    }

    fn min_args(&self) -> usize {
        3
    }

    fn max_args(&self) -> Option<usize> {
        Some(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testutil::{Fixture, record_json};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_add_creates_record() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("POST"))
                .and(path("/password_records"))
                .and(body_json(serde_json::json!({
                    "title": "github",
                    "username": "octocat",
                    "password": "pw",
                    "url": "https://github.com",
                })))
                .respond_with(
                    ResponseTemplate::new(201).set_body_json(record_json(1, "github")),
                ),
        );

        let mut ctx = fixture.ctx();
        let result = AddCommand.execute(&["github", "octocat", "https://github.com", "pw"], &mut ctx);

        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert_eq!(fixture.store.records.records.len(), 1);
        assert!(fixture.trie.contains("github"));
    }

    #[test]
    fn test_add_missing_args() {
        let mut fixture = Fixture::logged_in();
        let mut ctx = fixture.ctx();

        let result = AddCommand.execute(&["github"], &mut ctx);
        assert!(matches!(result, CommandResult::Error(_)));
        assert!(fixture.store.records.records.is_empty());
    }

    #[test]
    fn test_add_server_rejection() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("POST"))
                .and(path("/password_records"))
                .respond_with(
                    ResponseTemplate::new(422)
                        .set_body_json(serde_json::json!({"error": "Title can't be blank"})),
                ),
        );

        let mut ctx = fixture.ctx();
        let result = AddCommand.execute(&["x", "u", "https://x", "pw"], &mut ctx);

        match result {
            CommandResult::Error(msg) => assert_eq!(msg, "Title can't be blank"),
            _ => panic!("Expected error result"),
        }
    }
}
