use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::limits;
use crate::services::UserDirectory;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "UTILITY_API_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,

    /// Fixed user directory. Read once at startup and never written back.
    pub users: Vec<UserEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Either "pretty" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Upper bound for `POST /picture/invert` request bodies.
    pub max_upload_bytes: usize,

    /// Longer `GET /prime/{number}` inputs are rejected with 400.
    pub max_prime_digits: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_allowed_origins: vec![
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
            ],
            max_upload_bytes: limits::DEFAULT_MAX_UPLOAD_BYTES,
            max_prime_digits: limits::DEFAULT_MAX_PRIME_DIGITS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

/// One `[[users]]` table in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEntry {
    pub username: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,

    /// Output of the placeholder transform, see [`crate::services::transform_password`].
    pub hashed_password: String,

    #[serde(default)]
    pub disabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
            users: vec![UserEntry {
                username: "marcin".to_string(),
                email: Some("marcin.kopton@uekat.edu.pl".to_string()),
                full_name: Some("Marcin Kopton".to_string()),
                hashed_password: "hashedsekretnehaslo".to_string(),
                disabled: false,
            }],
        }
    }
}

impl Config {
    /// Resolves the config file in order: explicit path, `$UTILITY_API_CONFIG`,
    /// then the well-known locations. Falls back to defaults when none exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load_from_path(Path::new(&path));
        }

        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![Self::default_config_path()];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("utility-api").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".utility-api").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes the default config to `path` unless a file is already there.
    pub fn create_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("server.max_upload_bytes must be > 0");
        }

        if self.server.max_prime_digits == 0 {
            anyhow::bail!("server.max_prime_digits must be > 0");
        }

        UserDirectory::from_entries(&self.users).context("Invalid user directory")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].username, "marcin");
        assert_eq!(config.users[0].hashed_password, "hashedsekretnehaslo");
        assert!(!config.users[0].disabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[[users]]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [[users]]
            username = "alice"
            hashed_password = "hashedwonderland"

            [[users]]
            username = "bob"
            full_name = "Bob"
            hashed_password = "hashedbuilder"
            disabled = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users[0].email, None);
        assert!(config.users[1].disabled);
    }

    #[test]
    fn test_validate_rejects_duplicate_usernames() {
        let mut config = Config::default();
        config.users.push(config.users[0].clone());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_prime_digits() {
        let mut config = Config::default();
        config.server.max_prime_digits = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!(
            "utility-api-config-{}.toml",
            uuid::Uuid::new_v4()
        ));

        assert!(Config::create_default_if_missing(&path).unwrap());
        assert!(!Config::create_default_if_missing(&path).unwrap());

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.users, Config::default().users);

        std::fs::remove_file(&path).unwrap();
    }
}
