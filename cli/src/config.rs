use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Default base URL of the solve service.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Default, Deserialize)]
pub struct ModusConfig {
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    pub url: Option<String>,
}

impl ModusConfig {
    /// Load `~/.modus/config.toml`. Missing or malformed config is never
    /// fatal: it is logged and the defaults apply.
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return None;
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                None
            }
        }
    }

    /// Resolve the base URL: `MODUS_SERVER_URL` wins over the config
    /// file, which wins over the default.
    #[must_use]
    pub fn server_url(&self) -> String {
        if let Ok(url) = env::var("MODUS_SERVER_URL")
            && !url.trim().is_empty()
        {
            return url;
        }

        self.server
            .as_ref()
            .and_then(|server| server.url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".modus").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = ModusConfig::default();
        if env::var("MODUS_SERVER_URL").is_err() {
            assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        }
    }

    #[test]
    fn server_url_comes_from_the_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nurl = \"http://10.0.0.7:9100\"\n")
            .expect("write config");

        let config = ModusConfig::load_from(&path).expect("parsed config");
        if env::var("MODUS_SERVER_URL").is_err() {
            assert_eq!(config.server_url(), "http://10.0.0.7:9100");
        }
    }

    #[test]
    fn malformed_config_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = not toml at all [").expect("write config");

        assert!(ModusConfig::load_from(&path).is_none());
    }

    #[test]
    fn missing_config_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(ModusConfig::load_from(&dir.path().join("config.toml")).is_none());
    }
}
