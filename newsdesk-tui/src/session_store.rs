use anyhow::{Context, Result};
use newsdesk_api::CredentialProvider;
use std::path::{Path, PathBuf};

use crate::config::NewsdeskConfig;

/// Writes `content` to `path`, readable only by the current user on unix.
/// A file that already exists with looser permissions is tightened first.
fn write_private(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        if path.exists() {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict {}", path.display()))?;
        }
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    std::io::Write::write_all(&mut file, content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn token_path() -> Result<PathBuf> {
    Ok(NewsdeskConfig::config_dir()?.join("token"))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(NewsdeskConfig::config_dir()?.join("newsdesk.log"))
}

fn read_token(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let token = std::fs::read_to_string(path).context("Failed to read token file")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token))
}

pub fn load_token() -> Result<Option<String>> {
    read_token(&token_path()?)
}

pub fn save_token(token: &str) -> Result<()> {
    write_private(&token_path()?, token)
}

pub fn clear_token() -> Result<()> {
    let path = token_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Reads the stored token from disk each time a request is built, so a
/// `newsdesk login` in another terminal takes effect without a restart.
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: token_path()?,
        })
    }

    #[cfg(test)]
    fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialProvider for FileCredentials {
    fn bearer_token(&self) -> Option<String> {
        match read_token(&self.path) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Could not read stored token: {:#}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_credentials_follow_token_file() {
        let path = std::env::temp_dir()
            .join(format!("newsdesk-session-test-{}", std::process::id()))
            .join("token");
        let credentials = FileCredentials::at(path.clone());
        assert_eq!(credentials.bearer_token(), None);

        write_private(&path, "  abc123\n").unwrap();
        assert_eq!(credentials.bearer_token().as_deref(), Some("abc123"));

        write_private(&path, "").unwrap();
        assert_eq!(credentials.bearer_token(), None);

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private_even_if_it_existed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!("newsdesk-mode-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("token");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_private(&path, "new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        std::fs::remove_dir_all(&dir).ok();
    }
}
