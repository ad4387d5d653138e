//! Logout command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to end the current session.
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn name(&self) -> &str {
        "logout"
    }

    fn aliases(&self) -> &[&str] {
        &["signout"]
    }

    fn description(&self) -> &str {
        "Log out of the server"
    }

    fn usage(&self) -> &str {
        "logout"
    }

    fn help(&self) -> &str {
        "End the current session. The server invalidates the token and the\n\
         local copy is removed.\n\n\
         Examples:\n  \
           logout"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }

        ctx.perform(Request::Logout);

        if ctx.store.auth.is_authenticated {
            let message = ctx
                .store
                .auth
                .error
                .clone()
                .unwrap_or_else(|| "Logout failed".to_string());
            CommandResult::error(message)
        } else {
            log::info!("Logged out");
            CommandResult::success("Logged out")
        }
    }

    fn min_args(&self) -> usize {
        0
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
