use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable that overrides the config-file credential.
pub const API_KEY_ENV: &str = "QWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// QWeather API credential; `None` until `qweather configure` ran.
    pub api_key: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "qweather", "qweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace the stored API key.
    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// The credential to use for requests.
    ///
    /// `QWEATHER_API_KEY` wins over the config file; a missing key is a
    /// startup error, so it never surfaces as a per-request failure.
    pub fn api_key(&self) -> Result<String> {
        self.resolve_api_key(env::var(API_KEY_ENV).ok().as_deref())
    }

    /// Key resolution with the environment lookup injected, so tests don't
    /// have to mutate process-wide state.
    fn resolve_api_key(&self, env_value: Option<&str>) -> Result<String> {
        if let Some(key) = env_value {
            if !key.trim().is_empty() {
                return Ok(key.to_string());
            }
        }

        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow!(
                    "No QWeather API key configured.\n\
                     Hint: run `qweather configure` or set the {API_KEY_ENV} environment variable."
                )
            })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}
