use std::process::ExitCode;

use passlink::shell::{Shell, ShellConfig};
use passlink::shell::history::HistoryConfig;
use passlink::{ApiClient, AppConfig, Dispatcher, LogConfig, SessionStore, Store, init_logging};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.ensure_data_dir()?;
    init_logging(&LogConfig::new(config.log_path(), config.log_level))?;

    log::info!("Starting passlink against {}", config.api_url);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let session = SessionStore::new(config.session_path());
    let token = match session.load() {
        Ok(token) => token,
        Err(e) => {
            log::warn!("Ignoring unreadable session file: {}", e);
            None
        }
    };
    let has_token = token.is_some();

    let api = ApiClient::with_token(config.api_url.clone(), token);
    let dispatcher = Dispatcher::new(api, session);
    let mut store = Store::new(has_token);

    let shell = Shell::with_config(ShellConfig {
        history: HistoryConfig::new(config.history_path()),
        show_welcome: true,
        idle_timeout: config.idle_timeout,
    });
    shell.run(&mut store, &dispatcher, runtime.handle())
}
