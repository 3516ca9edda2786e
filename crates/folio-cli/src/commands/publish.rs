//! Publish command handlers

use anyhow::Result;

use folio_core::Store;

use crate::output::Output;

/// Copy the current draft into the published slot
pub fn publish(store: &Store, output: &Output) -> Result<()> {
    let published = store.publish()?;
    output.success("Draft published");
    output.print_published(&published)
}

/// Show the published resume
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let published = store.get_published()?;
    output.print_published(&published)
}
