//! Command trait and registry for the shell.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::effects::{Dispatcher, Request};
use crate::store::Store;
use crate::trie::Trie;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Success(Option<String>),
    /// Command failed with error message.
    Error(String),
    /// Signal to exit the shell.
    Exit,
    /// Continue without output.
    Continue,
}

impl CommandResult {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    pub fn ok() -> Self {
        CommandResult::Success(None)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandResult::Error(msg.into())
    }
}

/// Context available to commands during execution.
///
/// Commands never touch the HTTP client directly; they hand a [`Request`]
/// to [`perform`](ShellContext::perform) and then read the outcome off the
/// store.
pub struct ShellContext<'a> {
    pub store: &'a mut Store,
    pub dispatcher: &'a Dispatcher,
    /// Handle to the runtime the effect layer runs on.
    pub runtime: &'a tokio::runtime::Handle,
    /// Reference to the command registry for help command.
    pub registry: Option<&'a CommandRegistry>,
    /// Record titles for completion (resynced after each command).
    pub title_trie: &'a mut Trie,
}

impl<'a> ShellContext<'a> {
    pub fn new(
        store: &'a mut Store,
        dispatcher: &'a Dispatcher,
        runtime: &'a tokio::runtime::Handle,
        title_trie: &'a mut Trie,
    ) -> Self {
        Self {
            store,
            dispatcher,
            runtime,
            registry: None,
            title_trie,
        }
    }

    /// Sets the registry reference for help command.
    pub fn with_registry(mut self, registry: &'a CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Runs one request to completion, blocking the shell until the
    /// outcome has been applied to the store.
    pub fn perform(&mut self, request: Request) {
        self.runtime
            .block_on(self.dispatcher.run(self.store, request));
    }

    /// Revokes every grant given to a collaborator, returning the number
    /// of revocations issued.
    pub fn revoke_all(&mut self, email: &str) -> usize {
        self.runtime
            .block_on(self.dispatcher.revoke_all(self.store, email))
    }

    /// Returns an error result unless a session is active.
    pub fn require_session(&self) -> Option<CommandResult> {
        if self.store.auth.is_authenticated {
            None
        } else {
            Some(CommandResult::error(
                "Not logged in. Use 'login <email>' first.",
            ))
        }
    }

    /// Resolves a record argument: a numeric id is taken as-is, anything
    /// else must match the exact title of an owned record already listed.
    pub fn resolve_record(&self, arg: &str) -> Result<u64, String> {
        if let Ok(id) = arg.parse::<u64>() {
            return Ok(id);
        }
        self.store
            .records
            .find_by_title(arg)
            .map(|record| record.id)
            .ok_or_else(|| {
                format!(
                    "No record titled '{}'. Run 'list' to refresh, or pass an id.",
                    arg
                )
            })
    }
}

/// A command that can be executed in the shell.
pub trait Command: Send + Sync {
    /// Returns the primary name of the command.
    fn name(&self) -> &str;

    /// Returns command aliases (alternative names).
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Returns a short description of the command.
    fn description(&self) -> &str;

    /// Returns usage information (e.g., "share <email> [record]").
    fn usage(&self) -> &str;

    /// Returns detailed help text.
    fn help(&self) -> &str {
        self.description()
    }

    /// Executes the command with the given arguments.
    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult;

    /// Returns completions for the command's arguments.
    ///
    /// `arg_index` is the 0-based index of the argument being completed.
    #[allow(unused)]
    fn completions(&self, _arg_index: usize, _partial: &str, _ctx: &ShellContext) -> Vec<String> {
        vec![]
    }

    /// Returns the minimum number of required arguments.
    fn min_args(&self) -> usize {
        0
    }

    /// Returns the maximum number of arguments (None = unlimited).
    #[allow(unused)]
    fn max_args(&self) -> Option<usize> {
        None
    }
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// Registry of all available commands.
pub struct CommandRegistry {
    /// Commands indexed by their primary name.
    commands: HashMap<String, Arc<dyn Command>>,
    /// Alias to primary name mapping.
    aliases: HashMap<String, String>,
    /// Trie for command name completion.
    command_trie: Trie,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            command_trie: Trie::new(),
        }
    }

    /// Registers a command under its name and all aliases.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        self.command_trie.insert(&name);

        for alias in command.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
            self.command_trie.insert(alias);
        }

        self.commands.insert(name, command);
    }

    /// Looks up a command by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        if let Some(cmd) = self.commands.get(name) {
            return Some(Arc::clone(cmd));
        }
        if let Some(primary) = self.aliases.get(name) {
            return self.commands.get(primary).map(Arc::clone);
        }
        None
    }

    /// Returns all registered commands.
    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// Returns command name completions for the given prefix.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.command_trie.completions(prefix)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
