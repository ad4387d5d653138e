//! Register command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::types::RegisterRequest;

/// Command to create an account and start a session.
pub struct RegisterCommand;

impl Command for RegisterCommand {
    fn name(&self) -> &str {
        "register"
    }

    fn aliases(&self) -> &[&str] {
        &["signup"]
    }

    fn description(&self) -> &str {
        "Create a new account"
    }

    fn usage(&self) -> &str {
        "register <email> <display_name>"
    }

    fn help(&self) -> &str {
        "Create a new account and log in with it.\n\n\
         The password is prompted for twice; both entries must match.\n\n\
         Arguments:\n  \
           <email>        - Account email address\n  \
           <display_name> - Name shown to collaborators (may contain spaces)\n\n\
         Examples:\n  \
           register alice@example.com Alice\n  \
           register bob@example.com Bob the Builder"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.len() < 2 {
            return CommandResult::error(format!(
                "Usage: {}\nMissing required arguments",
                self.usage()
            ));
        }
        if ctx.store.auth.is_authenticated && ctx.store.auth.user.is_some() {
            return CommandResult::error("Already logged in. Use 'logout' first.");
        }

        let email = args[0].to_string();
        let display_name = args[1..].join(" ");

        let password = match rpassword::prompt_password("Password: ") {
            Ok(p) => p,
            Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
        };
        let confirmation = match rpassword::prompt_password("Confirm password: ") {
            Ok(p) => p,
            Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
        };
        if password != confirmation {
            return CommandResult::error("Passwords do not match");
        }

        log::debug!("Registering account {}", email);
        ctx.perform(Request::Register(RegisterRequest {
            email: email.clone(),
            password,
            display_name,
        }));

        if ctx.store.auth.is_authenticated {
            log::info!("Registered and logged in as {}", email);
            CommandResult::success(format!("Account created. Logged in as {}", email))
        } else {
            let message = ctx
                .store
                .auth
                .error
                .clone()
                .unwrap_or_else(|| "Registration failed".to_string());
            CommandResult::error(message)
        }
    }

    fn min_args(&self) -> usize {
        2
    }
}
