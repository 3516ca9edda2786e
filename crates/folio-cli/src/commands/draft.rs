//! Draft command handlers

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use folio_core::{validate, Resume, Store};

use crate::editor::edit_text;
use crate::output::Output;

/// Show the current draft
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let draft = store.get_draft()?;
    output.print_draft(&draft)
}

/// Replace the draft with a document read from `source` ("-" for stdin)
pub fn save(store: &Store, source: &str, expect: Option<String>, output: &Output) -> Result<()> {
    let content = read_source(source)?;
    let resume = parse_resume(&content, is_yaml_path(source))?;

    let record = match expect {
        Some(raw) => {
            let expected = parse_version(&raw)?;
            store.save_draft_if_unchanged(resume, expected)?
        }
        None => store.save_draft(resume)?,
    };

    output.success("Draft saved");
    output.print_draft(&record)
}

/// Edit the draft in $EDITOR
pub fn edit(store: &Store, output: &Output) -> Result<()> {
    let draft = store.get_draft()?;
    let original =
        serde_json::to_string_pretty(&draft.resume).context("Failed to serialize draft")?;

    let edited = edit_text(&original, "json")?;
    if edited.trim() == original.trim() {
        output.message("No changes.");
        return Ok(());
    }

    let resume = parse_resume(&edited, false)?;
    let record = store.save_draft_if_unchanged(resume, draft.updated_at)?;

    output.success("Draft saved");
    output.print_draft(&record)
}

fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read resume from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
    }
}

fn is_yaml_path(source: &str) -> bool {
    Path::new(source)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Parse and validate an incoming resume
///
/// Accepts either a bare resume or a record wrapper (`{ "resume": ... }`),
/// so the output of `draft show --json` can be fed straight back in.
pub fn parse_resume(content: &str, yaml: bool) -> Result<Resume> {
    let value: serde_json::Value = if yaml {
        serde_yaml::from_str(content).context("Invalid YAML")?
    } else {
        serde_json::from_str(content).context("Invalid JSON")?
    };

    let value = match value {
        serde_json::Value::Object(mut map) if map.contains_key("resume") => map
            .remove("resume")
            .unwrap_or(serde_json::Value::Null),
        other => other,
    };

    let resume: Resume = serde_json::from_value(value).context("Invalid resume payload")?;
    validate(&resume)?;
    Ok(resume)
}

fn parse_version(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("Invalid --expect timestamp '{}', use RFC 3339", raw))
}
