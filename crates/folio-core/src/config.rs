//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/folio/config.toml)
//! 3. Environment variables (FOLIO_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::history::DEFAULT_LIST_LIMIT;

/// Environment variable prefix
const ENV_PREFIX: &str = "FOLIO";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding draft, published snapshot and history
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Document used to seed the first draft (YAML or JSON)
    #[serde(default)]
    pub seed_resume_path: Option<PathBuf>,

    /// Publish the seeded draft right away on first start
    #[serde(default = "default_publish_on_init")]
    pub publish_on_init: bool,

    /// Page size for history listings when none is given
    #[serde(default = "default_history_limit")]
    pub history_limit_default: usize,

    /// Write logs here instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed_resume_path: None,
            publish_on_init: default_publish_on_init(),
            history_limit_default: default_history_limit(),
            log_file: None,
        }
    }
}

impl Config {
    /// Configuration rooted at `data_dir`, everything else default
    ///
    /// Environment overrides are not applied.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (FOLIO_DATA_DIR, FOLIO_SEED_RESUME_PATH,
    ///    FOLIO_SEED_PUBLISH_ON_INIT, FOLIO_LOG_FILE)
    /// 2. Config file (~/.config/folio/config.toml or FOLIO_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_SEED_RESUME_PATH", ENV_PREFIX)) {
            self.seed_resume_path = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // Only an explicit "false" turns seeding publication off
        if let Ok(val) = std::env::var(format!("{}_SEED_PUBLISH_ON_INIT", ENV_PREFIX)) {
            self.publish_on_init = !val.eq_ignore_ascii_case("false");
        }

        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with FOLIO_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("config.toml")
    }

    /// Path of the current draft
    pub fn draft_path(&self) -> PathBuf {
        self.data_dir.join("draft.json")
    }

    /// Path of the published snapshot
    pub fn published_path(&self) -> PathBuf {
        self.data_dir.join("published.json")
    }

    /// Directory holding one file per history entry
    pub fn history_dir(&self) -> PathBuf {
        self.data_dir.join("history")
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_publish_on_init() -> bool {
    true
}

fn default_history_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "FOLIO_DATA_DIR",
        "FOLIO_SEED_RESUME_PATH",
        "FOLIO_SEED_PUBLISH_ON_INIT",
        "FOLIO_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.publish_on_init);
        assert!(config.seed_resume_path.is_none());
        assert_eq!(config.history_limit_default, 50);
        assert!(config.data_dir.ends_with("folio"));
    }

    #[test]
    fn test_file_paths() {
        let config = Config::with_data_dir("/srv/folio");

        assert_eq!(config.draft_path(), PathBuf::from("/srv/folio/draft.json"));
        assert_eq!(
            config.published_path(),
            PathBuf::from("/srv/folio/published.json")
        );
        assert_eq!(config.history_dir(), PathBuf::from("/srv/folio/history"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("FOLIO_DATA_DIR", "/tmp/folio-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/folio-test"));
    }

    #[test]
    fn test_env_override_publish_on_init() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("FOLIO_SEED_PUBLISH_ON_INIT", "false");
        config.apply_env_overrides();
        assert!(!config.publish_on_init);

        env::set_var("FOLIO_SEED_PUBLISH_ON_INIT", "FALSE");
        config.publish_on_init = true;
        config.apply_env_overrides();
        assert!(!config.publish_on_init);

        // Anything else leaves it on
        env::set_var("FOLIO_SEED_PUBLISH_ON_INIT", "0");
        config.apply_env_overrides();
        assert!(config.publish_on_init);
    }

    #[test]
    fn test_env_override_seed_path() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("FOLIO_SEED_RESUME_PATH", "/etc/folio/resume.yaml");
        config.apply_env_overrides();
        assert_eq!(
            config.seed_resume_path,
            Some(PathBuf::from("/etc/folio/resume.yaml"))
        );

        // Empty string clears it
        env::set_var("FOLIO_SEED_RESUME_PATH", "");
        config.apply_env_overrides();
        assert!(config.seed_resume_path.is_none());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/folio"),
            seed_resume_path: Some(PathBuf::from("/data/seed.yaml")),
            publish_on_init: false,
            history_limit_default: 20,
            log_file: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("publish_on_init"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.seed_resume_path, config.seed_resume_path);
        assert_eq!(parsed.publish_on_init, config.publish_on_init);
        assert_eq!(parsed.history_limit_default, 20);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            publish_on_init = false
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert!(!config.publish_on_init);
        assert_eq!(config.history_limit_default, 50);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(config.publish_on_init);
        assert!(config.seed_resume_path.is_none());
    }

    #[test]
    fn test_save_to_path_round_trip() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::with_data_dir("/var/lib/folio");
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.data_dir, PathBuf::from("/var/lib/folio"));
    }
}
