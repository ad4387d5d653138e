//! Revoke commands: single grant and all grants for a collaborator.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::types::DeleteShareRequest;

/// Command to revoke one grant.
pub struct RevokeCommand;

impl Command for RevokeCommand {
    fn name(&self) -> &str {
        "revoke"
    }

    fn description(&self) -> &str {
        "Revoke a collaborator's access to one record"
    }

    fn usage(&self) -> &str {
        "revoke <email> <title-or-id>"
    }

    fn help(&self) -> &str {
        "Revoke a single grant you gave out.\n\n\
         Arguments:\n  \
           <email>       - Collaborator's account email\n  \
           <title-or-id> - Record the grant covers\n\n\
         Examples:\n  \
           revoke bob@example.com github\n  \
           revoke bob@example.com 42"
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

        let email = args[0].to_string();
        let password_record_id = match ctx.resolve_record(&args[1..].join(" ")) {
            Ok(id) => id,
            Err(message) => return CommandResult::error(message),
        };

        ctx.perform(Request::DeleteShare(DeleteShareRequest {
            email: email.clone(),
            password_record_id,
        }));

        if let Some(message) = ctx.store.sharing.error.clone() {
            return CommandResult::error(message);
        }

        log::info!("Revoked record {} from {}", password_record_id, email);
        CommandResult::success(format!(
            "Revoked record {} from {}",
            password_record_id, email
        ))
    }

    fn completions(&self, arg_index: usize, partial: &str, ctx: &ShellContext) -> Vec<String> {
        if arg_index == 1 {
            ctx.title_trie.completions(partial)
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        2
    }
}

/// Command to revoke every grant given to a collaborator.
pub struct RevokeAllCommand;

impl Command for RevokeAllCommand {
    fn name(&self) -> &str {
        "revoke-all"
    }

    fn description(&self) -> &str {
        "Revoke all of a collaborator's access"
    }

    fn usage(&self) -> &str {
        "revoke-all <email>"
    }

    fn help(&self) -> &str {
        "Revoke every grant you gave to a collaborator, one at a time. If a\n\
         revocation fails midway, earlier ones stay revoked.\n\n\
         Arguments:\n  \
           <email> - Collaborator's account email\n\n\
         Examples:\n  \
           revoke-all bob@example.com"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }
        if args.is_empty() {
            return CommandResult::error(format!("Usage: {}\nMissing email", self.usage()));
        }

        let email = args[0];
        let issued = ctx.revoke_all(email);

        if let Some(message) = ctx.store.sharing.error.clone() {
            return CommandResult::error(message);
        }
        if issued == 0 {
            return CommandResult::success(format!("No grants for {}", email));
        }

        log::info!("Revoked {} grants from {}", issued, email);
        CommandResult::success(format!("Revoked {} grants from {}", issued, email))
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testutil::{Fixture, grant_json};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_revoke_single_grant() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("DELETE"))
                .and(path("/shared_password_records"))
                .and(body_json(serde_json::json!({
                    "email": "bob@x.com",
                    "password_record_id": 7,
                })))
                .respond_with(ResponseTemplate::new(204)),
        );

        let mut ctx = fixture.ctx();
        let result = RevokeCommand.execute(&["bob@x.com", "7"], &mut ctx);

        assert!(matches!(result, CommandResult::Success(Some(_))));
    }

    #[test]
    fn test_revoke_all_issues_one_delete_per_grant() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("GET"))
                .and(path("/shared_password_records/shared_by_me"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    grant_json(1, 10, "bob@x.com"),
                    grant_json(2, 11, "bob@x.com"),
                    grant_json(3, 12, "carol@x.com"),
                ]))),
        );
        fixture.mount(
            Mock::given(method("DELETE"))
                .and(path("/shared_password_records"))
                .respond_with(ResponseTemplate::new(204))
                .expect(2),
        );

        let mut ctx = fixture.ctx();
        let result = RevokeAllCommand.execute(&["bob@x.com"], &mut ctx);

        match result {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("2 grants")),
            _ => panic!("Expected success with count"),
        }
        // carol's grant is untouched
        assert_eq!(fixture.store.sharing.granted_record_ids("carol@x.com"), vec![12]);
        fixture
            .runtime
            .block_on(fixture.server.verify());
    }

    #[test]
    fn test_revoke_all_with_no_grants() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("GET"))
                .and(path("/shared_password_records/shared_by_me"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([]))),
        );

        let mut ctx = fixture.ctx();
        let result = RevokeAllCommand.execute(&["bob@x.com"], &mut ctx);

        match result {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("No grants")),
            _ => panic!("Expected success message"),
        }
    }
}
