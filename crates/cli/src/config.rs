//! CLI configuration utilities

use anyhow::{Context, Result};
use jiupluck_core::ClientConfig;
use std::path::Path;

/// Effective configuration: file (or defaults), environment, then `--api-url`
pub fn load(path: Option<&Path>, api_url: Option<String>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ClientConfig::from_env().context("Failed to load configuration")?,
    };

    if let Some(api_url) = api_url {
        config.api.base_url = api_url;
    }

    Ok(config)
}

/// Write the default configuration in the format named by the extension
pub fn generate_default_config(path: &Path) -> Result<()> {
    ClientConfig::write_default(path)
        .with_context(|| format!("Failed to write configuration to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jiupluck.json");

        generate_default_config(&path).unwrap();
        let config = load(Some(&path), Some("https://pluck.example.com/api".into())).unwrap();

        assert_eq!(config.api.base_url, "https://pluck.example.com/api");
        assert_eq!(config.api.timeout_secs, ClientConfig::default().api.timeout_secs);
    }
}
