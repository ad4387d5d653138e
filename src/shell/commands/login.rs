//! Login command implementation.

use crate::effects::Request;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::types::LoginRequest;

/// Command to start a session.
pub struct LoginCommand;

impl Command for LoginCommand {
    fn name(&self) -> &str {
        "login"
    }

    fn aliases(&self) -> &[&str] {
        &["signin"]
    }

    fn description(&self) -> &str {
        "Log in to the server"
    }

    fn usage(&self) -> &str {
        "login <email> [password]"
    }

    fn help(&self) -> &str {
        "Log in with an existing account.\n\n\
         Arguments:\n  \
           <email>    - Account email address\n  \
           [password] - Password; prompted for if omitted\n\n\
         Examples:\n  \
           login alice@example.com\n  \
           login alice@example.com hunter2"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.is_empty() {
            return CommandResult::error(format!("Usage: {}\nMissing email", self.usage()));
        }
        if ctx.store.auth.is_authenticated && ctx.store.auth.user.is_some() {
            return CommandResult::error("Already logged in. Use 'logout' first.");
        }

        let email = args[0].to_string();
        let password = match args.get(1) {
            Some(p) => p.to_string(),
            None => match rpassword::prompt_password("Password: ") {
                Ok(p) => p,
                Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
            },
        };

        log::debug!("Logging in as {}", email);
        ctx.perform(Request::Login(LoginRequest {
            email: email.clone(),
            password,
        }));

        if ctx.store.auth.is_authenticated {
            log::info!("Logged in as {}", email);
            CommandResult::success(format!("Logged in as {}", email))
        } else {
            let message = ctx
                .store
                .auth
                .error
                .clone()
                .unwrap_or_else(|| "Login failed".to_string());
            CommandResult::error(message)
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
    use crate::shell::commands::testutil::{Fixture, user_json};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_login_success() {
        let mut fixture = Fixture::new();
        fixture.mount(
            Mock::given(method("POST"))
                .and(path("/auth/login"))
                .and(body_json(serde_json::json!({
                    "email": "alice@example.com",
                    "password": "pw"
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "user": user_json(1, "alice@example.com"),
                    "token": "t"
                }))),
        );

        let mut ctx = fixture.ctx();
        let result = LoginCommand.execute(&["alice@example.com", "pw"], &mut ctx);

        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert!(fixture.store.auth.is_authenticated);
        assert!(fixture.dispatcher.api().has_token());
    }

    #[test]
    fn test_login_bad_credentials() {
        let mut fixture = Fixture::new();
        fixture.mount(
            Mock::given(method("POST"))
                .and(path("/auth/login"))
                .respond_with(
                    ResponseTemplate::new(422)
                        .set_body_json(serde_json::json!({"error": "Invalid credentials"})),
                ),
        );

        let mut ctx = fixture.ctx();
        let result = LoginCommand.execute(&["alice@example.com", "wrong"], &mut ctx);

        match result {
            CommandResult::Error(msg) => assert_eq!(msg, "Invalid credentials"),
            _ => panic!("Expected error result"),
        }
        assert!(!fixture.store.auth.is_authenticated);
    }

    #[test]
    fn test_login_missing_args() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();

        let result = LoginCommand.execute(&[], &mut ctx);
        assert!(matches!(result, CommandResult::Error(_)));
    }
}
