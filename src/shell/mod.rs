//! Rustyline-based interactive shell.
//!
//! Provides command completion, syntax highlighting, history, hints, and
//! the inactivity auto-logout.

pub mod command;
pub mod commands;
pub mod completer;
pub mod highlighter;
pub mod hints;
pub mod history;

use anyhow::{Result, anyhow};
use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::{
    MatchingBracketValidator, ValidationContext, ValidationResult, Validator,
};
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::effects::{Dispatcher, Request};
use crate::store::Store;
use crate::trie::Trie;
use crate::watchdog::IdleWatchdog;

use command::{CommandRegistry, CommandResult, ShellContext};
use commands::register_all;
use completer::PasslinkCompleter;
use highlighter::{OutputHighlighter, PasslinkHighlighter};
use hints::PasslinkHinter;
use history::HistoryConfig;

/// The prompt displayed to the user.
const PROMPT: &str = "passlink> ";

/// Combined helper for rustyline that provides all shell features.
pub struct PasslinkHelper {
    completer: PasslinkCompleter,
    highlighter: PasslinkHighlighter,
    hinter: PasslinkHinter,
    validator: MatchingBracketValidator,
}

impl PasslinkHelper {
    pub fn new(registry: Arc<CommandRegistry>, title_trie: Arc<RwLock<Trie>>) -> Self {
        Self {
            completer: PasslinkCompleter::new(Arc::clone(&registry), Arc::clone(&title_trie)),
            highlighter: PasslinkHighlighter::new(Arc::clone(&registry)),
            hinter: PasslinkHinter::new(registry),
            validator: MatchingBracketValidator::new(),
        }
    }
}

impl Completer for PasslinkHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for PasslinkHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: rustyline::highlight::CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

impl Hinter for PasslinkHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Validator for PasslinkHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        self.validator.validate(ctx)
    }
}

impl Helper for PasslinkHelper {}

/// Configuration for the shell.
pub struct ShellConfig {
    /// History configuration.
    pub history: HistoryConfig,
    /// Whether to show the welcome message.
    pub show_welcome: bool,
    /// Inactivity window after which an active session is logged out.
    pub idle_timeout: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            show_welcome: true,
            idle_timeout: Duration::from_secs(300),
        }
    }
}

/// The interactive shell.
pub struct Shell {
    registry: Arc<CommandRegistry>,
    /// Record titles for completion (shared with helper).
    title_trie: Arc<RwLock<Trie>>,
    config: ShellConfig,
}

impl Shell {
    /// Creates a new shell with default configuration.
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    /// Creates a shell with custom configuration.
    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        Self {
            registry: Arc::new(registry),
            title_trie: Arc::new(RwLock::new(Trie::new())),
            config,
        }
    }

    /// Rebuilds the title trie from the records currently in the store.
    fn sync_title_trie(&self, store: &Store) {
        if let Ok(mut trie) = self.title_trie.write() {
            trie.clear();
            for record in store
                .records
                .records
                .iter()
                .chain(store.records.shared_records.iter())
            {
                trie.insert(&record.title);
            }
            log::debug!("Synced title trie with {} entries", trie.len());
        }
    }

    /// Runs the interactive shell until quit or EOF.
    pub fn run(
        &self,
        store: &mut Store,
        dispatcher: &Dispatcher,
        runtime: &tokio::runtime::Handle,
    ) -> Result<()> {
        self.sync_title_trie(store);

        let helper = PasslinkHelper::new(Arc::clone(&self.registry), Arc::clone(&self.title_trie));

        let mut editor: Editor<PasslinkHelper, FileHistory> = Editor::new()?;
        editor.set_helper(Some(helper));
        editor.set_max_history_size(self.config.history.max_entries)?;

        if self.config.history.path.exists() {
            if let Err(e) = editor.load_history(&self.config.history.path) {
                log::warn!("Could not load history: {}", e);
            } else {
                log::debug!("Loaded history from {}", self.config.history.path.display());
            }
        }

        if self.config.show_welcome {
            if store.auth.is_authenticated {
                println!("Session restored. Type 'help' for available commands.");
            } else {
                println!("Type 'login <email>' or 'register <email> <name>' to begin.");
            }
        }

        let mut watchdog = IdleWatchdog::new(self.config.idle_timeout);
        log::info!("Shell started");

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = editor.add_history_entry(line);

                    // The input arrived after the idle window closed, so the
                    // session it would have used is already forfeit.
                    if watchdog.is_expired() && store.auth.is_authenticated {
                        log::info!("Idle timeout reached; logging out");
                        runtime.block_on(dispatcher.run(store, Request::Logout));
                        eprintln!(
                            "{}",
                            OutputHighlighter::warning(
                                "Logged out after inactivity. Use 'login' to start over."
                            )
                        );
                        watchdog.touch();
                        continue;
                    }
                    watchdog.touch();

                    let mut title_trie_guard = self
                        .title_trie
                        .write()
                        .map_err(|e| anyhow!("Title trie lock poisoned: {}", e))?;
                    let mut ctx =
                        ShellContext::new(store, dispatcher, runtime, &mut title_trie_guard)
                            .with_registry(&self.registry);

                    let result = self.execute_with_context(line, &mut ctx);
                    drop(title_trie_guard);

                    match result {
                        CommandResult::Success(Some(msg)) => {
                            println!("{}", msg);
                        }
                        CommandResult::Success(None) => {}
                        CommandResult::Error(msg) => {
                            eprintln!("{}", OutputHighlighter::error(&msg));
                        }
                        CommandResult::Exit => {
                            log::info!("User requested exit");
                            break;
                        }
                        CommandResult::Continue => {}
                    }

                    // Commands that change the record set refresh completion
                    self.sync_title_trie(store);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    log::debug!("Interrupted (Ctrl-C)");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("exit");
                    log::info!("EOF received (Ctrl-D)");
                    break;
                }
                Err(err) => {
                    eprintln!("{}", OutputHighlighter::error(&format!("Error: {}", err)));
                    log::error!("Readline error: {}", err);
                    break;
                }
            }
        }

        if let Some(parent) = self.config.history.path.parent() {
            if !parent.exists() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        if let Err(e) = editor.save_history(&self.config.history.path) {
            log::warn!("Failed to save history: {}", e);
        } else {
            log::debug!("Saved history to {}", self.config.history.path.display());
        }

        log::info!("Shell exited");
        Ok(())
    }

    /// Parses and executes a single command line.
    #[allow(unused)]
    fn execute_line(
        &self,
        line: &str,
        store: &mut Store,
        dispatcher: &Dispatcher,
        runtime: &tokio::runtime::Handle,
    ) -> CommandResult {
        let mut title_trie_guard = match self.title_trie.write() {
            Ok(guard) => guard,
            Err(e) => return CommandResult::error(format!("Title trie lock poisoned: {}", e)),
        };
        let mut ctx = ShellContext::new(store, dispatcher, runtime, &mut title_trie_guard)
            .with_registry(&self.registry);

        self.execute_with_context(line, &mut ctx)
    }

    /// Executes a command with the given context.
    fn execute_with_context(&self, line: &str, ctx: &mut ShellContext) -> CommandResult {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.is_empty() {
            return CommandResult::Continue;
        }

        let cmd_name = parts[0];
        let args: Vec<&str> = parts[1..].to_vec();

        log::debug!("Executing command: {} with args: {:?}", cmd_name, args);

        match self.registry.get(cmd_name) {
            Some(cmd) => {
                let start = std::time::Instant::now();
                let result = cmd.execute(&args, ctx);
                let duration = start.elapsed();
                log::debug!("Command '{}' completed in {:?}", cmd_name, duration);
                result
            }
            None => CommandResult::error(format!(
                "Unknown command: '{}'\nType 'help' to see available commands.",
                cmd_name
            )),
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testutil::Fixture;
    use crate::store::{Action, RecordsAction};
    use crate::types::{FetchRecordsResponse, PasswordRecord};

    fn record(id: u64, title: &str) -> PasswordRecord {
        PasswordRecord {
            id,
            title: title.to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
            url: "https://example.com".to_string(),
            user: None,
        }
    }

    #[test]
    fn test_shell_creation() {
        let shell = Shell::new();
        assert!(!shell.registry.is_empty());
    }

    #[test]
    fn test_execute_line_unknown_command() {
        let shell = Shell::new();
        let mut fixture = Fixture::new();

        let result = shell.execute_line(
            "frobnicate",
            &mut fixture.store,
            &fixture.dispatcher,
            fixture.runtime.handle(),
        );
        assert!(matches!(result, CommandResult::Error(_)));
    }

    #[test]
    fn test_execute_line_help() {
        let shell = Shell::new();
        let mut fixture = Fixture::new();

        let result = shell.execute_line(
            "help",
            &mut fixture.store,
            &fixture.dispatcher,
            fixture.runtime.handle(),
        );
        assert!(matches!(result, CommandResult::Success(Some(_))));
    }

    #[test]
    fn test_execute_line_quit() {
        let shell = Shell::new();
        let mut fixture = Fixture::new();

        let result = shell.execute_line(
            "quit",
            &mut fixture.store,
            &fixture.dispatcher,
            fixture.runtime.handle(),
        );
        assert!(matches!(result, CommandResult::Exit));
    }

    #[test]
    fn test_title_trie_sync() {
        let shell = Shell::new();
        let mut store = Store::new(true);
        store.dispatch(Action::Records(RecordsAction::FetchAllSuccess(
            FetchRecordsResponse {
                owner_records: vec![record(1, "github"), record(2, "bank")],
                shared_records: vec![record(3, "team wiki")],
            },
        )));

        shell.sync_title_trie(&store);

        let trie = shell.title_trie.read().unwrap();
        assert!(trie.contains("github"));
        assert!(trie.contains("bank"));
        assert!(trie.contains("team wiki"));
        assert_eq!(trie.len(), 3);
    }
}
