use anyhow::{Context, Result};
use newsdesk_api::{NewsClient, NoCredentials};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::session_store;

/// Prompt for credentials, call `POST /auth/login` and store the returned token.
pub async fn run_login(api_url: &str) -> Result<()> {
    let client = NewsClient::new(api_url, Arc::new(NoCredentials))?;

    print!("Email: ");
    io::stdout().flush()?;
    let mut email = String::new();
    io::stdin()
        .lock()
        .read_line(&mut email)
        .context("Failed to read email")?;
    let email = email.trim();
    if email.is_empty() {
        anyhow::bail!("Email is required");
    }

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let token = client
        .login(email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e.user_message()))?;

    session_store::save_token(&token)?;
    tracing::info!("Logged in as {}", email);
    println!("Login successful. Token saved.");

    Ok(())
}
