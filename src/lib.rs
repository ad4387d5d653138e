//! Passlink - a shell client for the passlink password-sharing server.
//!
//! This library provides the client's building blocks: the wire types and
//! HTTP client for the REST backend, the state slices and effect layer
//! driving them, and the rustyline-based interactive shell.

pub mod api;
pub mod config;
pub mod effects;
pub mod error;
pub mod logging;
pub mod session;
pub mod shell;
pub mod store;
pub mod trie;
pub mod types;
pub mod watchdog;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::AppConfig;
pub use effects::{Dispatcher, Request};
pub use error::ApiError;
pub use logging::{LogConfig, init_logging};
pub use session::SessionStore;
pub use shell::Shell;
pub use store::Store;
pub use trie::Trie;
