//! Storage statistics for status reporting

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

/// Snapshot of what is on disk
#[derive(Debug, Clone, Default)]
pub struct StorageStats {
    pub draft_exists: bool,
    pub published_exists: bool,
    pub draft_updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub history_entries: usize,
    /// Bytes used by draft, published and history files
    pub total_size: u64,
}

impl StorageStats {
    /// Total size formatted for humans (B, KB, MB)
    pub fn total_size_human(&self) -> String {
        format_size(self.total_size)
    }
}

/// Sum file sizes under `path`, recursing into subdirectories
pub(crate) fn dir_size(path: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };

    entries
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let meta = e.metadata().ok()?;
            if meta.is_dir() {
                Some(dir_size(&e.path()))
            } else {
                Some(meta.len())
            }
        })
        .sum()
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
