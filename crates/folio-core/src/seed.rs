//! Seed document for the first draft
//!
//! Source order: the configured `seed_resume_path`, then the document bundled
//! into this crate, then `Resume::empty()`. A bad seed never stops the store
//! from starting; it only produces a warning.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::Resume;
use crate::validate::validate;

const BUNDLED_SEED: &str = include_str!("../assets/default_resume.yaml");

/// Resolve the document used to seed an empty store
pub fn load_seed(config: &Config) -> Resume {
    if let Some(path) = &config.seed_resume_path {
        match read_seed_file(path) {
            Ok(resume) => {
                info!("Seeding draft from {:?}", path);
                return resume;
            }
            Err(e) => warn!("Ignoring seed resume {:?}: {:#}", path, e),
        }
    }

    match parse_seed(BUNDLED_SEED) {
        Ok(resume) => resume,
        Err(e) => {
            warn!("Bundled seed resume unusable, starting empty: {:#}", e);
            Resume::empty()
        }
    }
}

fn read_seed_file(path: &Path) -> Result<Resume> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed resume {:?}", path))?;
    parse_seed(&content)
}

/// Parse and validate seed text. JSON seeds go through the YAML parser too.
fn parse_seed(content: &str) -> Result<Resume> {
    let resume = Resume::from_yaml_str(content).context("Failed to parse seed resume")?;
    validate(&resume)?;
    Ok(resume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_seed_is_valid() {
        let resume = parse_seed(BUNDLED_SEED).unwrap();
        assert_eq!(resume.profile.name, "Your Name");
        assert!(!resume.projects.is_empty());
    }

    #[test]
    fn test_default_config_uses_bundled_seed() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_data_dir(temp_dir.path());

        let resume = load_seed(&config);
        assert_eq!(resume, parse_seed(BUNDLED_SEED).unwrap());
    }

    #[test]
    fn test_configured_seed_file() {
        let temp_dir = TempDir::new().unwrap();
        let seed_path = temp_dir.path().join("resume.json");
        let mut custom = Resume::empty();
        custom.profile.name = "Katherine".to_string();
        fs::write(&seed_path, serde_json::to_string(&custom).unwrap()).unwrap();

        let mut config = Config::with_data_dir(temp_dir.path());
        config.seed_resume_path = Some(seed_path);

        assert_eq!(load_seed(&config).profile.name, "Katherine");
    }

    #[test]
    fn test_bad_seed_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let seed_path = temp_dir.path().join("resume.yaml");
        fs::write(&seed_path, "profile: [not, a, profile]").unwrap();

        let mut config = Config::with_data_dir(temp_dir.path());
        config.seed_resume_path = Some(seed_path);

        assert_eq!(load_seed(&config).profile.name, "Your Name");
    }

    #[test]
    fn test_missing_seed_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::with_data_dir(temp_dir.path());
        config.seed_resume_path = Some(temp_dir.path().join("nope.yaml"));

        assert_eq!(load_seed(&config).profile.name, "Your Name");
    }
}
