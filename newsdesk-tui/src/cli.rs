use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "newsdesk")]
#[command(about = "Terminal dashboard for publishing news articles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured news API (default)
    Run,
    /// Run with an in-memory backend seeded with sample articles
    Dev,
    /// Log in with email and password and store the token
    Login,
    /// Remove the stored token
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
