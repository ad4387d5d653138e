//! Account commands: whoami, profile update, account deletion.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::types::UpdateProfileRequest;

/// Command to show the logged-in account.
pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn name(&self) -> &str {
        "whoami"
    }

    fn aliases(&self) -> &[&str] {
        &["me"]
    }

    fn description(&self) -> &str {
        "Show the logged-in account"
    }

    fn usage(&self) -> &str {
        "whoami"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }

        match &ctx.store.auth.user {
            Some(user) => CommandResult::success(format!("{} <{}>", user.display_name, user.email)),
            // A restored session knows the token but not the account yet
            None => CommandResult::success("Logged in (identity not fetched yet)"),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// Command to update profile details.
pub struct ProfileCommand;

impl Command for ProfileCommand {
    fn name(&self) -> &str {
        "profile"
    }

    fn aliases(&self) -> &[&str] {
        &["update-profile"]
    }

    fn description(&self) -> &str {
        "Update email, display name or password"
    }

    fn usage(&self) -> &str {
        "profile <email> <display_name>"
    }

    fn help(&self) -> &str {
        "Update the account profile. The current password is always required;\n\
         a new password is optional (leave the prompt empty to keep the old one).\n\n\
         Arguments:\n  \
           <email>        - New (or unchanged) email address\n  \
           <display_name> - New (or unchanged) display name; may contain spaces\n\n\
         Examples:\n  \
           profile alice@example.com Alice\n  \
           profile alice@new.example.com Alice Cooper"
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
        let display_name = args[1..].join(" ");

        let current_password = match rpassword::prompt_password("Current password: ") {
            Ok(p) => p,
            Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
        };
        let new_password = match rpassword::prompt_password("New password (empty to keep): ") {
            Ok(p) => p,
            Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
        };

        let (password, password_confirmation) = if new_password.is_empty() {
            (None, None)
        } else {
            let confirmation = match rpassword::prompt_password("Confirm new password: ") {
                Ok(p) => p,
                Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
            };
            if new_password != confirmation {
                return CommandResult::error("Passwords do not match");
            }
            (Some(new_password), Some(confirmation))
        };

        ctx.perform(Request::UpdateProfile(UpdateProfileRequest {
            display_name,
            email,
            current_password,
            password,
            password_confirmation,
        }));

        if let Some(message) = ctx.store.auth.error.clone() {
            CommandResult::error(message)
        } else {
            log::info!("Profile updated");
            CommandResult::success("Profile updated")
        }
    }

    fn min_args(&self) -> usize {
        2
    }
}

/// Command to permanently delete the account.
pub struct DeleteAccountCommand;

impl Command for DeleteAccountCommand {
    fn name(&self) -> &str {
        "delete-account"
    }

    fn description(&self) -> &str {
        "Permanently delete the account"
    }

    fn usage(&self) -> &str {
        "delete-account confirm"
    }

    fn help(&self) -> &str {
        "Permanently delete the account and every record it owns.\n\n\
         This cannot be undone. The literal word 'confirm' is required.\n\n\
         Examples:\n  \
           delete-account confirm"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Some(err) = ctx.require_session() {
            return err;
        }
        if args.first() != Some(&"confirm") {
            return CommandResult::error(format!(
                "This permanently deletes the account and all its records.\n\
                 Run '{}' to proceed.",
                self.usage()
            ));
        }

        ctx.perform(Request::DeleteAccount);

        if ctx.store.auth.is_authenticated {
            let message = ctx
                .store
                .auth
                .error
                .clone()
                .unwrap_or_else(|| "Account deletion failed".to_string());
            CommandResult::error(message)
        } else {
            log::info!("Account deleted");
            CommandResult::success("Account deleted")
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
