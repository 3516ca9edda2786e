//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_core::{
    DraftRecord, HistoryPage, HistoryRecord, PublishedRecord, Resume, ResumeSummary,
};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the current draft
    pub fn print_draft(&self, draft: &DraftRecord) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Draft updated: {}", format_time(&draft.updated_at));
                println!();
                print_resume_summary(&draft.resume);
                Ok(())
            }
            OutputFormat::Json => print_json(draft),
            OutputFormat::Quiet => {
                println!("{}", draft.updated_at.to_rfc3339());
                Ok(())
            }
        }
    }

    /// Print the published snapshot
    pub fn print_published(&self, published: &PublishedRecord) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Published: {}", format_time(&published.published_at));
                println!();
                print_resume_summary(&published.resume);
                Ok(())
            }
            OutputFormat::Json => print_json(published),
            OutputFormat::Quiet => {
                println!("{}", published.published_at.to_rfc3339());
                Ok(())
            }
        }
    }

    /// Print a page of history entries
    pub fn print_history_page(&self, page: &HistoryPage) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if page.items.is_empty() {
                    println!("No draft history yet.");
                    return Ok(());
                }
                for item in &page.items {
                    let when = item
                        .updated_at
                        .as_ref()
                        .map(format_time)
                        .unwrap_or_else(|| "unknown time".to_string());
                    println!(
                        "{} | {} | {} | {}",
                        item.id,
                        when,
                        truncate(or_placeholder(&item.profile_name, "Untitled"), 25),
                        truncate(or_placeholder(&item.profile_title, "No title"), 30)
                    );
                }
                println!("\nShowing {} of {} entr(ies)", page.items.len(), page.total);
                Ok(())
            }
            OutputFormat::Json => print_json(page),
            OutputFormat::Quiet => {
                for item in &page.items {
                    println!("{}", item.id);
                }
                Ok(())
            }
        }
    }

    /// Print one history entry in full
    pub fn print_history_record(&self, record: &HistoryRecord) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("History entry: {}", record.id);
                println!("Saved:         {}", format_time(&record.updated_at));
                println!();
                print_resume_summary(&record.resume);
                Ok(())
            }
            OutputFormat::Json => print_json(record),
            OutputFormat::Quiet => {
                println!("{}", record.id);
                Ok(())
            }
        }
    }

    /// Print a diff summary
    pub fn print_diff(&self, lines: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if lines.is_empty() {
                    println!("No headline differences.");
                }
                for line in lines {
                    println!("  {}", line);
                }
                Ok(())
            }
            OutputFormat::Json => print_json(&lines),
            OutputFormat::Quiet => {
                for line in lines {
                    println!("{}", line);
                }
                Ok(())
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Pretty-print any serializable value as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn print_resume_summary(resume: &Resume) {
    let summary = ResumeSummary::of(resume);
    println!("Name:       {}", or_placeholder(&summary.name, "(empty)"));
    println!("Title:      {}", or_placeholder(&summary.title, "(empty)"));
    println!("Location:   {}", or_placeholder(&summary.location, "(empty)"));
    println!("Email:      {}", or_placeholder(&summary.email, "(empty)"));
    println!("Site title: {}", or_placeholder(&summary.site_title, "(empty)"));
    println!("Theme:      {}", summary.theme);
    println!("Language:   {}", summary.language);
    println!(
        "Sections:   {} experience, {} projects, {} skill categories, {} education",
        summary.experience_count,
        summary.project_count,
        summary.skill_count,
        summary.education_count
    );
}

fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        // Multi-byte names are cut on character boundaries
        assert_eq!(truncate("Zoë Ångström-Ødegaard", 8), "Zoë Å...");
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder("", "Untitled"), "Untitled");
        assert_eq!(or_placeholder("Ada", "Untitled"), "Ada");
    }

    #[test]
    fn test_format_time() {
        use chrono::TimeZone;
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 0).unwrap();
        assert_eq!(format_time(&ts), "2026-10-19 08:05:00 UTC");
    }
}
