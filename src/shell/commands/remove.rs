//! Remove command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to delete a record.
pub struct RemoveCommand;

impl Command for RemoveCommand {
    fn name(&self) -> &str {
        "remove"
    }

    fn aliases(&self) -> &[&str] {
        &["rm", "delete"]
    }

    fn description(&self) -> &str {
        "Delete a record"
    }

    fn usage(&self) -> &str {
        "remove <title-or-id>"
    }

    fn help(&self) -> &str {
        "Delete an owned record from the server. Grants on the record are\n\
         removed with it.\n\n\
         Arguments:\n  \
           <title-or-id> - Exact title of an owned record, or its id\n\n\
         Examples:\n  \
           remove github\n  \
           rm 42"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }
        if args.is_empty() {
            return CommandResult::error(format!("Usage: {}\nMissing record", self.usage()));
        }

        let arg = args.join(" ");
        let id = match ctx.resolve_record(&arg) {
            Ok(id) => id,
            Err(message) => return CommandResult::error(message),
        };
        let title = ctx.store.records.find(id).map(|r| r.title.clone());

        log::debug!("Deleting record {}", id);
        ctx.perform(Request::DeleteRecord(id));

        if let Some(message) = ctx.store.records.error.clone() {
            return CommandResult::error(message);
        }

        if let Some(title) = &title {
            ctx.title_trie.remove(title);
        }
        log::info!("Deleted record {}", id);
        CommandResult::success(format!("Removed '{}'", title.unwrap_or(arg)))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testutil::{Fixture, record_json};
    use crate::store::{Action, RecordsAction};
    use crate::types::FetchRecordsResponse;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn seed_record(fixture: &mut Fixture) {
        fixture
            .store
            .dispatch(Action::Records(RecordsAction::FetchAllSuccess(
                FetchRecordsResponse {
                    owner_records: vec![serde_json::from_value(record_json(7, "github")).unwrap()],
                    shared_records: vec![],
                },
            )));
        fixture.trie.insert("github");
    }

    #[test]
    fn test_remove_by_title() {
        let mut fixture = Fixture::logged_in();
        seed_record(&mut fixture);
        fixture.mount(
            Mock::given(method("DELETE"))
                .and(path("/password_records/7"))
                .respond_with(ResponseTemplate::new(204)),
        );

        let mut ctx = fixture.ctx();
        let result = RemoveCommand.execute(&["github"], &mut ctx);

        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert!(fixture.store.records.find(7).is_none());
        assert!(!fixture.trie.contains("github"));
    }

    #[test]
    fn test_remove_unknown_title() {
        let mut fixture = Fixture::logged_in();
        let mut ctx = fixture.ctx();

        let result = RemoveCommand.execute(&["nonexistent"], &mut ctx);
        assert!(matches!(result, CommandResult::Error(_)));
    }

    #[test]
    fn test_remove_server_error_keeps_record() {
        let mut fixture = Fixture::logged_in();
        seed_record(&mut fixture);
        fixture.mount(
            Mock::given(method("DELETE"))
                .and(path("/password_records/7"))
                .respond_with(
                    ResponseTemplate::new(403)
                        .set_body_json(serde_json::json!({"error": "Forbidden"})),
                ),
        );

        let mut ctx = fixture.ctx();
        let result = RemoveCommand.execute(&["7"], &mut ctx);

        assert!(matches!(result, CommandResult::Error(_)));
        assert!(fixture.store.records.find(7).is_some());
        assert!(fixture.trie.contains("github"));
    }
}
