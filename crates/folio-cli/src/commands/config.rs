//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use folio_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "seed_resume_path": config.seed_resume_path,
                    "publish_on_init": config.publish_on_init,
                    "history_limit_default": config.history_limit_default,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:              {}", config.data_dir.display());
            println!(
                "  seed_resume_path:      {}",
                display_optional_path(config.seed_resume_path.as_ref())
            );
            println!("  publish_on_init:       {}", config.publish_on_init);
            println!("  history_limit_default: {}", config.history_limit_default);
            println!(
                "  log_file:              {}",
                display_optional_path(config.log_file.as_ref())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "seed_resume_path" => {
            config.seed_resume_path = optional_path(value);
        }
        "publish_on_init" => {
            config.publish_on_init = value
                .parse()
                .context("Invalid value for publish_on_init. Use 'true' or 'false'.")?;
        }
        "history_limit_default" => {
            let limit: usize = value
                .parse()
                .context("Invalid value for history_limit_default. Use a number.")?;
            config.history_limit_default = folio_core::clamp_limit(limit);
        }
        "log_file" => {
            config.log_file = optional_path(value);
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, seed_resume_path, publish_on_init, history_limit_default, log_file",
                key
            );
        }
    }
    Ok(())
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.into())
    }
}

fn display_optional_path(path: Option<&PathBuf>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::with_data_dir("/tmp/folio");

        apply(&mut config, "publish_on_init", "false").unwrap();
        assert!(!config.publish_on_init);

        apply(&mut config, "seed_resume_path", "/etc/resume.yaml").unwrap();
        assert_eq!(
            config.seed_resume_path,
            Some(PathBuf::from("/etc/resume.yaml"))
        );

        apply(&mut config, "seed_resume_path", "none").unwrap();
        assert!(config.seed_resume_path.is_none());

        apply(&mut config, "history_limit_default", "5000").unwrap();
        assert_eq!(config.history_limit_default, 200);
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::with_data_dir("/tmp/folio");
        assert!(apply(&mut config, "publish_on_init", "maybe").is_err());
        assert!(apply(&mut config, "history_limit_default", "many").is_err());
        assert!(apply(&mut config, "theme", "dark").is_err());
    }

    #[test]
    fn test_set_writes_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set(
            "history_limit_default".to_string(),
            "25".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("history_limit_default = 25"));
    }
}
