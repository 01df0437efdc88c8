//! Configuration management for the Jiu-Pluck client

use crate::{CoreError, CoreResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the persisted token pair inside the state directory
pub const TOKEN_FILE_NAME: &str = "auth-storage.json";

/// Main client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend API configuration
    pub api: ApiConfig,

    /// Directory holding persisted client state (tokens)
    pub state_dir: PathBuf,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address of the REST API, including the `/api` prefix
    pub base_url: String,

    /// Request timeout in seconds (0 = transport default)
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            state_dir: default_state_dir(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
            user_agent: format!("jiupluck-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

fn default_state_dir() -> PathBuf {
    ProjectDirs::from("", "", "jiupluck").map_or_else(
        || PathBuf::from(".").join("jiupluck"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

impl ClientConfig {
    /// Load configuration from file, then environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let settings = Self::defaults_builder()?
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration with defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> CoreResult<Self> {
        let settings = Self::defaults_builder()?
            .add_source(Self::environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Path of the persisted token pair
    pub fn token_file(&self) -> PathBuf {
        self.state_dir.join(TOKEN_FILE_NAME)
    }

    /// Write the default configuration to `path`, creating parent directories
    ///
    /// The format follows the extension: `.json` or `.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error for any other extension, or if the file or its
    /// directory cannot be written
    pub fn write_default<P: AsRef<Path>>(path: P) -> CoreResult<()> {
        let path = path.as_ref();
        let defaults = Self::default();
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(&defaults)?,
            Some("toml") => toml::to_string_pretty(&defaults)?,
            _ => {
                return Err(CoreError::invalid_config(format!(
                    "{} must end in .json or .toml",
                    path.display()
                )));
            }
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| CoreError::io(parent, &err))?;
        }
        std::fs::write(path, content).map_err(|err| CoreError::io(path, &err))
    }

    fn defaults_builder() -> CoreResult<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Self::default();

        Ok(config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("api.user_agent", defaults.api.user_agent)?
            .set_default("state_dir", defaults.state_dir.to_string_lossy().to_string())?)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("JIUPLUCK").separator("__")
    }
}
