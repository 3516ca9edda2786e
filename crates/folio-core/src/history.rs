//! Draft history
//!
//! An append-only log of every saved draft. Each entry is one JSON file in
//! the history directory, named after its `HistoryId` and never rewritten.
//!
//! Listing reads entries leniently: only `updatedAt` and the profile name
//! and title are needed for a summary, so an entry whose resume no longer
//! matches the current model still shows up. Files that are not JSON at all
//! are skipped with a warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::history_id::HistoryId;
use crate::models::{DraftRecord, HistoryEntry, HistoryPage, HistoryRecord};
use crate::storage::{create_json, is_temp_file, read_json, RecordKind, StoreError, StoreResult};

/// Smallest page a listing returns
pub const MIN_LIST_LIMIT: usize = 1;
/// Largest page a listing returns
pub const MAX_LIST_LIMIT: usize = 200;
/// Page size used when the caller does not pick one
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Attempts at finding an unused id before giving up
const APPEND_ATTEMPTS: usize = 3;

/// Clamp a requested page size into `[MIN_LIST_LIMIT, MAX_LIST_LIMIT]`
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_LIST_LIMIT, MAX_LIST_LIMIT)
}

/// File-backed history of saved drafts
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    /// Create a history store rooted at `dir`
    ///
    /// The directory is created lazily on first append.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist `record` as a new immutable entry and return its id
    ///
    /// An existing entry is never overwritten; on an id collision a fresh
    /// id is generated.
    pub fn append(&self, record: &DraftRecord) -> StoreResult<HistoryId> {
        self.append_with(record, || HistoryId::generate(record.updated_at))
    }

    fn append_with(
        &self,
        record: &DraftRecord,
        mut next_id: impl FnMut() -> HistoryId,
    ) -> StoreResult<HistoryId> {
        let mut last_path = self.dir.clone();
        for _ in 0..APPEND_ATTEMPTS {
            let id = next_id();
            let path = self.entry_path(&id);
            if create_json(&path, record)? {
                debug!("Appended history entry {}", id);
                return Ok(id);
            }
            debug!("History id {} already taken, retrying", id);
            last_path = path;
        }

        Err(StoreError::from_io(
            io::Error::new(io::ErrorKind::AlreadyExists, "history id collision"),
            last_path,
        ))
    }

    /// List entries, most recent first
    ///
    /// `limit` is clamped to `[MIN_LIST_LIMIT, MAX_LIST_LIMIT]`. `total` is
    /// the number of readable entries, independent of `limit`.
    pub fn list(&self, limit: usize) -> StoreResult<HistoryPage> {
        let mut items = self.read_entries()?;
        sort_entries(&mut items);

        let total = items.len();
        items.truncate(clamp_limit(limit));

        Ok(HistoryPage { total, items })
    }

    /// Number of readable entries
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.read_entries()?.len())
    }

    /// Fetch one entry in full
    ///
    /// Ids that fail validation are reported as `NotFound` without touching
    /// the filesystem.
    pub fn get(&self, id: &str) -> StoreResult<HistoryRecord> {
        let Ok(id) = HistoryId::parse(id) else {
            debug!("Rejected invalid history id {:?}", id);
            return Err(StoreError::NotFound(RecordKind::HistoryEntry));
        };

        let record: DraftRecord = read_json(&self.entry_path(&id))?
            .ok_or(StoreError::NotFound(RecordKind::HistoryEntry))?;

        Ok(HistoryRecord::from_draft(id, record))
    }

    fn entry_path(&self, id: &HistoryId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    fn read_entries(&self) -> StoreResult<Vec<HistoryEntry>> {
        let dir_entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::from_read_io(e, self.dir.clone())),
        };

        let mut items = Vec::new();
        for dir_entry in dir_entries {
            let dir_entry = dir_entry.map_err(|e| StoreError::from_read_io(e, self.dir.clone()))?;
            let path = dir_entry.path();

            let Some(id) = entry_id_from_path(&path) else {
                continue;
            };

            match read_json::<Value>(&path) {
                Ok(Some(value)) => items.push(summarize_entry(id, &value)),
                // Removed between read_dir and read
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable history entry {}: {}", id, e),
            }
        }

        Ok(items)
    }
}

/// Map a directory entry to a history id, ignoring anything that isn't one
fn entry_id_from_path(path: &Path) -> Option<HistoryId> {
    let name = path.file_name()?.to_str()?;
    if is_temp_file(name) {
        return None;
    }
    let stem = name.strip_suffix(".json")?;
    HistoryId::parse(stem).ok()
}

fn summarize_entry(id: HistoryId, value: &Value) -> HistoryEntry {
    let text = |pointer: &str| {
        value
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    HistoryEntry {
        updated_at: value
            .get("updatedAt")
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
        profile_name: text("/resume/profile/name"),
        profile_title: text("/resume/profile/title"),
        id,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Newest first; entries without a timestamp go last; ties broken by id
fn sort_entries(items: &mut [HistoryEntry]) {
    items.sort_by(|a, b| {
        let by_time = match (a.updated_at, b.updated_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        by_time.then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resume;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn record_at(ts: DateTime<Utc>, name: &str) -> DraftRecord {
        let mut resume = Resume::empty();
        resume.profile.name = name.to_string();
        resume.profile.title = format!("{} title", name);
        DraftRecord {
            updated_at: ts,
            resume,
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_append_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));

        let record = record_at(base_time(), "Ada");
        let id = history.append(&record).unwrap();

        let loaded = history.get(id.as_str()).unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.updated_at, record.updated_at);
        assert_eq!(loaded.resume, record.resume);
    }

    #[test]
    fn test_append_never_overwrites_existing_entry() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));
        let taken = HistoryId::parse("20260301T090000000000Z-aaaaaaaa").unwrap();
        let fresh = HistoryId::parse("20260301T090000000000Z-bbbbbbbb").unwrap();

        let original = record_at(base_time(), "Ada");
        let first = history.append_with(&original, || taken.clone()).unwrap();
        assert_eq!(first, taken);

        // Same id comes up first, then a free one
        let mut ids = vec![fresh.clone(), taken.clone()];
        let later = record_at(base_time() + Duration::minutes(1), "Grace");
        let second = history.append_with(&later, || ids.pop().unwrap()).unwrap();
        assert_eq!(second, fresh);

        assert_eq!(history.get(taken.as_str()).unwrap().resume.profile.name, "Ada");
        assert_eq!(history.get(fresh.as_str()).unwrap().resume.profile.name, "Grace");
        assert_eq!(history.count().unwrap(), 2);
    }

    #[test]
    fn test_append_gives_up_after_repeated_collisions() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));
        let taken = HistoryId::parse("20260301T090000000000Z-aaaaaaaa").unwrap();

        history
            .append_with(&record_at(base_time(), "Ada"), || taken.clone())
            .unwrap();
        let result = history.append_with(&record_at(base_time(), "Grace"), || taken.clone());

        assert!(result.is_err());
        assert_eq!(history.get(taken.as_str()).unwrap().resume.profile.name, "Ada");
        assert_eq!(history.count().unwrap(), 1);
    }

    #[test]
    fn test_list_empty_when_dir_missing() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));

        let page = history.list(50).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_list_orders_newest_first_and_limits() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));

        for (offset, name) in [(1, "one"), (3, "three"), (2, "two")] {
            let ts = base_time() + Duration::minutes(offset);
            history.append(&record_at(ts, name)).unwrap();
        }

        let page = history.list(2).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].profile_name, "three");
        assert_eq!(page.items[0].profile_title, "three title");
        assert_eq!(page.items[1].profile_name, "two");
    }

    #[test]
    fn test_list_limit_is_clamped() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));

        history.append(&record_at(base_time(), "a")).unwrap();
        history.append(&record_at(base_time(), "b")).unwrap();

        let page = history.list(0).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 2);

        assert_eq!(clamp_limit(0), MIN_LIST_LIMIT);
        assert_eq!(clamp_limit(10_000), MAX_LIST_LIMIT);
        assert_eq!(clamp_limit(25), 25);
    }

    #[test]
    fn test_same_timestamp_ties_are_stable() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));

        for name in ["a", "b", "c", "d"] {
            history.append(&record_at(base_time(), name)).unwrap();
        }

        let first: Vec<_> = history.list(10).unwrap().items;
        let second: Vec<_> = history.list(10).unwrap().items;
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("history");
        let history = HistoryStore::new(&dir);

        history.append(&record_at(base_time(), "good")).unwrap();
        fs::write(dir.join("20260101T000000000000Z-deadbeef.json"), b"{ broken").unwrap();

        let page = history.list(50).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].profile_name, "good");

        let err = history.get("20260101T000000000000Z-deadbeef").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_missing_timestamp_sorts_last() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("history");
        let history = HistoryStore::new(&dir);

        history.append(&record_at(base_time(), "dated")).unwrap();
        fs::write(
            dir.join("zzzz-undated.json"),
            br#"{"updatedAt": "yesterday", "resume": {"profile": {"name": "undated"}}}"#,
        )
        .unwrap();

        let page = history.list(50).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].profile_name, "dated");
        assert_eq!(page.items[1].profile_name, "undated");
        assert!(page.items[1].updated_at.is_none());
    }

    #[test]
    fn test_foreign_files_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("history");
        let history = HistoryStore::new(&dir);

        history.append(&record_at(base_time(), "real")).unwrap();
        fs::write(dir.join("notes.txt"), b"hello").unwrap();
        fs::write(dir.join(".pending.json.abc.tmp"), b"{}").unwrap();

        assert_eq!(history.count().unwrap(), 1);
    }

    #[test]
    fn test_get_rejects_unsafe_ids() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));

        // A file that a traversal would reach if the id were passed through
        fs::write(temp_dir.path().join("secret.json"), b"{}").unwrap();

        for id in ["../secret", "", "..", "a/b", "x.json"] {
            let err = history.get(id).unwrap_err();
            assert!(err.is_not_found(), "{:?} should be not found", id);
        }
    }

    #[test]
    fn test_get_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("history"));

        let err = history.get("20990101T000000000000Z-00000000").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(RecordKind::HistoryEntry)));
    }
}
