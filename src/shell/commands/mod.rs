//! Individual command implementations.

mod add;
mod edit;
mod help;
mod list;
mod login;
mod logout;
mod profile;
mod quit;
mod register;
mod remove;
mod revoke;
mod share;
mod shares;
mod show;

pub use add::AddCommand;
pub use edit::EditCommand;
pub use help::HelpCommand;
pub use list::ListCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use profile::{DeleteAccountCommand, ProfileCommand, WhoamiCommand};
pub use quit::QuitCommand;
pub use register::RegisterCommand;
pub use remove::RemoveCommand;
pub use revoke::{RevokeAllCommand, RevokeCommand};
pub use share::ShareCommand;
pub use shares::SharesCommand;
pub use show::ShowCommand;

use std::sync::Arc;

use crate::types::PasswordRecord;

use super::command::CommandRegistry;

/// Registers all built-in commands with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(LoginCommand));
    registry.register(Arc::new(RegisterCommand));
    registry.register(Arc::new(LogoutCommand));
    registry.register(Arc::new(WhoamiCommand));
    registry.register(Arc::new(ProfileCommand));
    registry.register(Arc::new(DeleteAccountCommand));
    registry.register(Arc::new(ListCommand));
    registry.register(Arc::new(ShowCommand));
    registry.register(Arc::new(AddCommand));
    registry.register(Arc::new(EditCommand));
    registry.register(Arc::new(RemoveCommand));
    registry.register(Arc::new(ShareCommand));
    registry.register(Arc::new(SharesCommand));
    registry.register(Arc::new(RevokeCommand));
    registry.register(Arc::new(RevokeAllCommand));
    registry.register(Arc::new(HelpCommand));
    registry.register(Arc::new(QuitCommand));
}

/// One-line listing form of a record.
fn record_line(record: &PasswordRecord) -> String {
    format!("  [{}] {} ({})", record.id, record.title, record.username)
}
