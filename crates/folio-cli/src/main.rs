//! Folio CLI
//!
//! Command-line interface for Folio - draft, publish and restore a resume.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use folio_core::{Config, Store, StoreError};

mod commands;
mod editor;
mod logging;
mod output;

use output::{Output, OutputFormat};

/// Exit status for "record not found"
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - Versioned resume drafts with history")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and seed the first draft
    Init,
    /// Work with the current draft
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Publish the current draft
    Publish,
    /// Work with the published resume
    Published {
        #[command(subcommand)]
        command: PublishedCommands,
    },
    /// Browse and restore draft history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Show storage status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Show the current draft
    Show,
    /// Replace the draft with a JSON or YAML document
    Save {
        /// File to read, or "-" for stdin
        file: String,
        /// Only save if the draft is still at this version (its updatedAt)
        #[arg(long, value_name = "RFC3339")]
        expect: Option<String>,
    },
    /// Edit the draft in $EDITOR
    Edit,
}

#[derive(Subcommand)]
enum PublishedCommands {
    /// Show the published resume
    Show,
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List saved drafts, most recent first
    #[command(alias = "ls")]
    List {
        /// Maximum entries to show (1-200)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one history entry
    Show {
        /// History entry id
        id: String,
    },
    /// Compare the current draft with a history entry
    Diff {
        /// History entry id
        id: String,
    },
    /// Restore a history entry as the new draft
    Restore {
        /// History entry id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, seed_resume_path, publish_on_init,
        /// history_limit_default, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let store_error = find_store_error(&e);
            if let Some(hint) = store_error.and_then(StoreError::recovery_suggestion) {
                eprintln!("Hint: {}", hint);
            }
            if store_error.is_some_and(StoreError::is_not_found) {
                ExitCode::from(EXIT_NOT_FOUND)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(cli.verbose, config.log_file.as_deref());

    let store = Store::new(config);
    let report = store
        .bootstrap()
        .context("Failed to initialize data directory")?;
    tracing::debug!(
        "Opened store at {:?} ({:?})",
        store.config().data_dir,
        report
    );

    match cli.command {
        Commands::Init => commands::init::show(&store, report, &output),
        Commands::Draft { command } => match command {
            DraftCommands::Show => commands::draft::show(&store, &output),
            DraftCommands::Save { file, expect } => {
                commands::draft::save(&store, &file, expect, &output)
            }
            DraftCommands::Edit => commands::draft::edit(&store, &output),
        },
        Commands::Publish => commands::publish::publish(&store, &output),
        Commands::Published { command } => match command {
            PublishedCommands::Show => commands::publish::show(&store, &output),
        },
        Commands::History { command } => match command {
            HistoryCommands::List { limit } => commands::history::list(&store, limit, &output),
            HistoryCommands::Show { id } => commands::history::show(&store, &id, &output),
            HistoryCommands::Diff { id } => commands::history::diff(&store, &id, &output),
            HistoryCommands::Restore { id, yes } => {
                commands::history::restore(&store, &id, yes, &output)
            }
        },
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn find_store_error(error: &anyhow::Error) -> Option<&StoreError> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StoreError>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use folio_core::RecordKind;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_history_restore() {
        let cli = Cli::try_parse_from(["folio", "history", "restore", "abc-123", "--yes"]).unwrap();
        match cli.command {
            Commands::History {
                command: HistoryCommands::Restore { id, yes },
            } => {
                assert_eq!(id, "abc-123");
                assert!(yes);
            }
            _ => panic!("expected history restore"),
        }
    }

    #[test]
    fn test_find_store_error_through_context() {
        let err = anyhow::Error::new(StoreError::NotFound(RecordKind::Published))
            .context("Failed to show published resume");
        let found = find_store_error(&err).unwrap();
        assert!(found.is_not_found());

        let plain = anyhow::anyhow!("something else");
        assert!(find_store_error(&plain).is_none());
    }
}
