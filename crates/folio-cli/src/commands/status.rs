//! Status command handler

use anyhow::Result;
use chrono::{DateTime, Utc};

use folio_core::Store;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let stats = store.stats()?;
    let config = store.config();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "draft": {
                        "exists": stats.draft_exists,
                        "updated_at": stats.draft_updated_at
                    },
                    "published": {
                        "exists": stats.published_exists,
                        "published_at": stats.published_at
                    },
                    "history_entries": stats.history_entries,
                    "total_size": stats.total_size
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", stats.history_entries);
        }
        OutputFormat::Human => {
            println!("Folio Status");
            println!("============");
            println!();
            println!("Draft:     {}", describe(stats.draft_exists, stats.draft_updated_at));
            println!(
                "Published: {}",
                describe(stats.published_exists, stats.published_at)
            );
            println!("History:   {} entr(ies)", stats.history_entries);
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Size:     {}", stats.total_size_human());
        }
    }

    Ok(())
}

fn describe(exists: bool, at: Option<DateTime<Utc>>) -> String {
    match (exists, at) {
        (false, _) => "none".to_string(),
        (true, Some(ts)) => ts.format("%Y-%m-%d %H:%M UTC").to_string(),
        (true, None) => "present but unreadable".to_string(),
    }
}
