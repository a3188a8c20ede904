use std::path::PathBuf;

use serde::Deserialize;

/// Connection settings for the provisioning API, loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, e.g. `http://localhost:8000`.
    pub api_url: String,
}

impl ClientConfig {
    pub fn from_file(path: PathBuf) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config = toml::from_str(&config_str).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file {}: {}", path.display(), e)
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_minimal_config() {
        let config: ClientConfig = toml::from_str("api_url = \"http://localhost:8000\"").unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
    }
}
