//! List command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::shell::commands::record_line;
use crate::types::RecordFilter;

/// Command to fetch and list password records.
pub struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn aliases(&self) -> &[&str] {
        &["ls"]
    }

    fn description(&self) -> &str {
        "List password records"
    }

    fn usage(&self) -> &str {
        "list [query]"
    }

    fn help(&self) -> &str {
        "Fetch and list records: the ones you own, then the ones shared with\n\
         you. With a query, the server filters by title, username and URL.\n\n\
         Examples:\n  \
           list\n  \
           list github"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }

        let filter = if args.is_empty() {
            RecordFilter::default()
        } else {
            RecordFilter::query(args.join(" "))
        };

        ctx.perform(Request::FetchRecords(filter));

        if let Some(message) = ctx.store.records.error.clone() {
            return CommandResult::error(message);
        }

        let records = &ctx.store.records;
        if records.records.is_empty() && records.shared_records.is_empty() {
            return CommandResult::success("No records found.");
        }

        let mut output = String::new();
        if !records.records.is_empty() {
            output.push_str("Your records:\n");
            for record in &records.records {
                output.push_str(&record_line(record));
                output.push('\n');
            }
        }
        if !records.shared_records.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("Shared with you:\n");
            for record in &records.shared_records {
                output.push_str(&record_line(record));
                output.push('\n');
            }
        }

        log::info!(
            "Listed {} owned and {} shared records",
            records.records.len(),
            records.shared_records.len()
        );
        CommandResult::success(output.trim_end().to_string())
    }

    fn min_args(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testutil::{Fixture, record_json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_list_shows_both_sections() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("GET"))
                .and(path("/password_records"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "owner_records": [record_json(1, "github")],
                    "shared_records": [record_json(2, "team wiki")],
                }))),
        );

        let mut ctx = fixture.ctx();
        let result = ListCommand.execute(&[], &mut ctx);

        match result {
            CommandResult::Success(Some(msg)) => {
                assert!(msg.contains("Your records:"));
                assert!(msg.contains("github"));
                assert!(msg.contains("Shared with you:"));
                assert!(msg.contains("team wiki"));
            }
            _ => panic!("Expected success with listing"),
        }
    }

    #[test]
    fn test_list_query_sends_all_three_params() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("GET"))
                .and(path("/password_records"))
                .and(query_param("search_by_title", "git"))
                .and(query_param("search_by_username", "git"))
                .and(query_param("search_by_url", "git"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "owner_records": [record_json(1, "github")],
                    "shared_records": [],
                }))),
        );

        let mut ctx = fixture.ctx();
        let result = ListCommand.execute(&["git"], &mut ctx);

        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert_eq!(fixture.store.records.records.len(), 1);
    }

    #[test]
    fn test_list_empty() {
        let mut fixture = Fixture::logged_in();
        fixture.mount(
            Mock::given(method("GET"))
                .and(path("/password_records"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "owner_records": [],
                    "shared_records": [],
                }))),
        );

        let mut ctx = fixture.ctx();
        let result = ListCommand.execute(&[], &mut ctx);

        match result {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("No records")),
            _ => panic!("Expected success message"),
        }
    }

    #[test]
    fn test_list_requires_session() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();

        let result = ListCommand.execute(&[], &mut ctx);
        assert!(matches!(result, CommandResult::Error(_)));
    }
}
