use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_pause_on_exit")]
    pub pause_on_exit: bool,
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,
}

fn default_pause_on_exit() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pause_on_exit: default_pause_on_exit(),
            read_timeout_ms: None,
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
            .join(".config")
            .join("overseer-check")
            .join("config.toml")
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {:?}", path))?;
        Ok(config)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "overseer-check-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("overseer-check-does-not-exist.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.pause_on_exit);
        assert_eq!(config.read_timeout(), None);
    }

    #[test]
    fn test_partial_file() {
        let path = temp_config("partial", "read_timeout_ms = 2500\n");
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(config.pause_on_exit);
        assert_eq!(config.read_timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_no_pause() {
        let path = temp_config("no-pause", "pause_on_exit = false\n");
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(!config.pause_on_exit);
    }

    #[test]
    fn test_invalid_file() {
        let path = temp_config("invalid", "pause_on_exit = \"sometimes\"\n");
        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
