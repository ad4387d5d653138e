//! Share command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::types::ShareRequest;

/// Command to grant a collaborator access to records.
pub struct ShareCommand;

impl Command for ShareCommand {
    fn name(&self) -> &str {
        "share"
    }

    fn description(&self) -> &str {
        "Share a record (or everything) with another account"
    }

    fn usage(&self) -> &str {
        "share <email> [title-or-id]"
    }

    fn help(&self) -> &str {
        "Grant another account read access.\n\n\
         With a record, shares that one record. Without one, shares every\n\
         record you own, now and in the future.\n\n\
         Arguments:\n  \
           <email>       - Collaborator's account email\n  \
           [title-or-id] - Record to share; omit to share everything\n\n\
         Examples:\n  \
           share bob@example.com github\n  \
           share bob@example.com"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }
        if args.is_empty() {
            return CommandResult::error(format!("Usage: {}\nMissing email", self.usage()));
        }

        let email = args[0].to_string();
        let password_record_id = if args.len() > 1 {
            match ctx.resolve_record(&args[1..].join(" ")) {
                Ok(id) => Some(id),
                Err(message) => return CommandResult::error(message),
            }
        } else {
            None
        };

        log::debug!("Sharing with {} (record: {:?})", email, password_record_id);
        ctx.perform(Request::CreateShare(ShareRequest {
            email: email.clone(),
            password_record_id,
        }));

        if let Some(message) = ctx.store.sharing.error.clone() {
            return CommandResult::error(message);
        }

        log::info!("Shared with {}", email);
        match password_record_id {
            Some(id) => CommandResult::success(format!("Shared record {} with {}", id, email)),
            None => CommandResult::success(format!("Shared all records with {}", email)),
        }
    }

    fn completions(&self, arg_index: usize, partial: &str, ctx: &ShellContext) -> Vec<String> {
        if arg_index == 1 {
            ctx.title_trie.completions(partial)
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testutil::{Fixture, grant_json};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_share_single_record() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("POST"))
                .and(path("/shared_password_records"))
                .and(body_json(serde_json::json!({
                    "email": "bob@x.com",
                    "password_record_id": 7,
                })))
                .respond_with(
                    ResponseTemplate::new(201).set_body_json(grant_json(1, 7, "bob@x.com")),
                ),
        );

        let mut ctx = fixture.ctx();
        let result = ShareCommand.execute(&["bob@x.com", "7"], &mut ctx);

        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert_eq!(fixture.store.sharing.shared_by_me.len(), 1);
    }

    #[test]
    fn test_share_everything_omits_record_id() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("POST"))
                .and(path("/shared_password_records"))
                .and(body_json(serde_json::json!({"email": "bob@x.com"})))
                .respond_with(
                    ResponseTemplate::new(201).set_body_json(grant_json(1, 7, "bob@x.com")),
                ),
        );

        let mut ctx = fixture.ctx();
        let result = ShareCommand.execute(&["bob@x.com"], &mut ctx);

        assert!(matches!(result, CommandResult::Success(Some(_))));
    }

    #[test]
    fn test_share_unknown_collaborator() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("POST"))
                .and(path("/shared_password_records"))
                .respond_with(
                    ResponseTemplate::new(404)
                        .set_body_json(serde_json::json!({"error": "User not found"})),
                ),
        );

        let mut ctx = fixture.ctx();
        let result = ShareCommand.execute(&["ghost@x.com"], &mut ctx);

        match result {
            CommandResult::Error(msg) => assert_eq!(msg, "User not found"),
            _ => panic!("Expected error result"),
        }
    }
}
