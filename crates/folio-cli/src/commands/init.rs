//! Init command handler

use anyhow::Result;

use folio_core::{BootstrapReport, Store};

use crate::output::{Output, OutputFormat};

/// Report what opening the store created
///
/// The store has already been bootstrapped by the time this runs; the
/// report comes from that call.
pub fn show(store: &Store, report: BootstrapReport, output: &Output) -> Result<()> {
    let data_dir = &store.config().data_dir;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": data_dir,
                    "seeded_draft": report.seeded_draft,
                    "published_seed": report.published_seed
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", data_dir.display());
        }
        OutputFormat::Human => {
            if report.seeded_draft {
                println!("Created draft from seed document.");
            } else {
                println!("Draft already exists.");
            }
            if report.published_seed {
                println!("Published the seeded draft.");
            }
            println!();
            println!("Data directory: {}", data_dir.display());
        }
    }

    Ok(())
}
