use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "NEWSDESK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsdeskConfig {
    /// Base URL of the news API including any path prefix, e.g. "http://localhost:3000/api"
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "http://localhost:3000/api".to_string()
}

impl Default for NewsdeskConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl NewsdeskConfig {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("newsdesk"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from defaults, the config file (if any) and `NEWSDESK_*`
    /// environment variables, in increasing priority.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?, None)
    }

    fn load_from(path: &Path, env: Option<HashMap<String, String>>) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("api_url", default_api_url())?
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()
            .with_context(|| format!("Failed to read config at {}", path.display()))?;

        settings
            .try_deserialize::<Self>()
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Write the default config if no file exists yet. Returns the path.
    pub fn ensure_default_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("newsdesk-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file_yields_default() {
        let config =
            NewsdeskConfig::load_from(&scratch_path("missing.toml"), Some(HashMap::new()))
                .unwrap();
        assert_eq!(config, NewsdeskConfig::default());
    }

    #[test]
    fn file_then_env_override_default() {
        let path = scratch_path("layered.toml");
        NewsdeskConfig {
            api_url: "https://file.example.com/api".to_string(),
        }
        .save_to(&path)
        .unwrap();

        let from_file = NewsdeskConfig::load_from(&path, Some(HashMap::new())).unwrap();
        assert_eq!(from_file.api_url, "https://file.example.com/api");

        let env = HashMap::from([(
            "NEWSDESK_API_URL".to_string(),
            "https://env.example.com/api".to_string(),
        )]);
        let from_env = NewsdeskConfig::load_from(&path, Some(env)).unwrap();
        assert_eq!(from_env.api_url, "https://env.example.com/api");

        std::fs::remove_file(&path).ok();
    }
}
