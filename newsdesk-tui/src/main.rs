mod app;
mod cli;
mod config;
mod dev_backend;
mod login;
mod runtime;
mod session_store;
#[cfg(test)]
mod test_support;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use newsdesk_api::{NewsBackend, NewsClient};
use ratatui::{backend::CrosstermBackend, Terminal};
use runtime::SessionMode;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let cli = cli::Cli::parse();
    match cli.command.unwrap_or(cli::Commands::Run) {
        cli::Commands::Run => {
            let cfg = config::NewsdeskConfig::load()?;
            if session_store::load_token()?.is_none() {
                anyhow::bail!(
                    "Not logged in. Run `newsdesk login` to authenticate against {}",
                    cfg.api_url
                );
            }
            let credentials = session_store::FileCredentials::new()?;
            let client = NewsClient::new(&cfg.api_url, Arc::new(credentials))?;
            tracing::info!("Starting newsdesk against {}", client.base_url());
            run_tui(App::new(cfg.api_url), Arc::new(client), SessionMode::Stored).await
        }
        cli::Commands::Dev => {
            tracing::info!("Starting newsdesk with the in-memory backend");
            run_tui(
                App::new("dev (in-memory)"),
                Arc::new(dev_backend::DevBackend::new()),
                SessionMode::Dev,
            )
            .await
        }
        cli::Commands::Login => {
            let cfg = config::NewsdeskConfig::load()?;
            login::run_login(&cfg.api_url).await
        }
        cli::Commands::Logout => {
            session_store::clear_token()?;
            tracing::info!("Logged out");
            println!("Logged out.");
            Ok(())
        }
        cli::Commands::ConfigPath => {
            let path = config::NewsdeskConfig::ensure_default_file()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Log to a file in the config directory; stdout belongs to the terminal UI.
fn init_logging() -> Result<()> {
    let path = session_store::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("newsdesk=info,newsdesk_api=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
}

async fn run_tui(
    mut app: App,
    backend: Arc<dyn NewsBackend>,
    session: SessionMode,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = runtime::run_app(&mut terminal, &mut app, backend, session).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    if app.logged_out {
        println!("Logged out. Run `newsdesk login` to sign in again.");
    }
    Ok(())
}
