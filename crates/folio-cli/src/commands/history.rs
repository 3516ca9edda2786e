//! Draft history command handlers

use anyhow::Result;

use folio_core::{clamp_limit, summarize, Store};

use crate::editor::confirm;
use crate::output::Output;

/// List history entries, most recent first
pub fn list(store: &Store, limit: Option<usize>, output: &Output) -> Result<()> {
    let limit = clamp_limit(limit.unwrap_or(store.config().history_limit_default));
    let page = store.history().list(limit)?;
    output.print_history_page(&page)
}

/// Show one history entry
pub fn show(store: &Store, id: &str, output: &Output) -> Result<()> {
    let record = store.history().get(id)?;
    output.print_history_record(&record)
}

/// Compare the current draft against a history entry
pub fn diff(store: &Store, id: &str, output: &Output) -> Result<()> {
    let record = store.history().get(id)?;
    let draft = store.get_draft()?;

    if output.should_prompt() {
        println!("Changes from {} to the current draft:", record.id);
    }
    output.print_diff(&summarize(&draft.resume, &record.resume))
}

/// Restore a history entry as a new draft save
pub fn restore(store: &Store, id: &str, yes: bool, output: &Output) -> Result<()> {
    let record = store.history().get(id)?;

    if output.should_prompt() && !yes {
        let draft = store.get_draft()?;
        let changes = summarize(&record.resume, &draft.resume);
        println!("Restoring {} will change the draft:", record.id);
        output.print_diff(&changes)?;
        if !confirm("Restore this entry?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    let restored = store.restore(record.id.as_str())?;

    output.success(&format!("Restored draft from {}", record.id));
    output.print_draft(&restored)
}
