//! Shares command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to list grants in both directions.
pub struct SharesCommand;

impl Command for SharesCommand {
    fn name(&self) -> &str {
        "shares"
    }

    fn aliases(&self) -> &[&str] {
        &["grants"]
    }

    fn description(&self) -> &str {
        "List shares given and received"
    }

    fn usage(&self) -> &str {
        "shares"
    }

    fn help(&self) -> &str {
        "Fetch and list share grants: records others shared with you, then\n\
         the grants you gave out, grouped by collaborator.\n\n\
         Examples:\n  \
           shares"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }

        ctx.perform(Request::FetchSharedWithMe);
        if let Some(message) = ctx.store.sharing.error.clone() {
            return CommandResult::error(message);
        }
        ctx.perform(Request::FetchSharedByMe);
        if let Some(message) = ctx.store.sharing.error.clone() {
            return CommandResult::error(message);
        }

        let sharing = &ctx.store.sharing;
        if sharing.shared_with_me.is_empty() && sharing.shared_by_me.is_empty() {
            return CommandResult::success("No shares.");
        }

        let mut output = String::new();
        if !sharing.shared_with_me.is_empty() {
            output.push_str("Shared with you:\n");
            for grant in &sharing.shared_with_me {
                output.push_str(&format!(
                    "  [{}] {} (from {} <{}>)\n",
                    grant.password_record.id,
                    grant.password_record.title,
                    grant.owner.display_name,
                    grant.owner.email,
                ));
            }
        }
        if !sharing.shared_by_me.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("Shared by you:\n");
            for (email, grants) in sharing.by_collaborator() {
                output.push_str(&format!("  {}:\n", email));
                for grant in grants {
                    output.push_str(&format!(
                        "    [{}] {}\n",
                        grant.password_record.id, grant.password_record.title
                    ));
                }
            }
        }

        log::info!(
            "Listed {} received and {} given grants",
            sharing.shared_with_me.len(),
            sharing.shared_by_me.len()
        );
        CommandResult::success(output.trim_end().to_string())
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
