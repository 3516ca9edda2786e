//! Content store
//!
//! The `Store` owns the data directory and is the single source of truth for
//! the current draft and the published snapshot. Every draft save also
//! appends an entry to the draft history.
//!
//! ## Bootstrap
//!
//! Opening a store on an empty directory seeds a draft (see `seed`) and, when
//! `publish_on_init` is set, publishes it straight away. Seeding writes the
//! draft directly and does not create a history entry.
//!
//! ## Concurrency
//!
//! The store keeps no in-memory state; each operation reads and writes
//! files. Every record is replaced atomically, but there is no lock across
//! records: concurrent saves race last-writer-wins on the draft while each
//! still produces its own history entry. `Store` is `Send + Sync` and can be
//! shared behind an `Arc`.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open()?;
//!
//! let draft = store.save_draft(resume)?;
//! let published = store.publish()?;
//!
//! let page = store.history().list(20)?;
//! let restored = store.restore(page.items[0].id.as_str())?;
//! ```

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::history::HistoryStore;
use crate::models::{DraftRecord, PublishedRecord, Resume};
use crate::seed::load_seed;
use crate::storage::stats::dir_size;
use crate::storage::{read_json, write_json, RecordKind, StorageStats, StoreError, StoreResult};

/// What `bootstrap` had to create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub seeded_draft: bool,
    pub published_seed: bool,
}

/// File-backed content store
#[derive(Debug, Clone)]
pub struct Store {
    config: Config,
    history: HistoryStore,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config).context("Failed to open content store")
    }

    /// Open the store with a specific configuration, bootstrapping if needed
    pub fn open_with_config(config: Config) -> StoreResult<Self> {
        let store = Self::new(config);
        store.bootstrap()?;
        Ok(store)
    }

    /// Create a store handle without touching the filesystem
    pub fn new(config: Config) -> Self {
        let history = HistoryStore::new(config.history_dir());
        Self { config, history }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the draft history
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Seed the draft and published snapshot if they don't exist yet
    pub fn bootstrap(&self) -> StoreResult<BootstrapReport> {
        let mut report = BootstrapReport::default();

        std::fs::create_dir_all(&self.config.data_dir).map_err(|source| {
            StoreError::CreateDirectory {
                path: self.config.data_dir.clone(),
                source,
            }
        })?;

        if !self.config.draft_path().exists() {
            let record = DraftRecord {
                updated_at: Utc::now(),
                resume: load_seed(&self.config),
            };
            write_json(&self.config.draft_path(), &record)?;
            info!("Seeded draft in {:?}", self.config.data_dir);
            report.seeded_draft = true;
        }

        if self.config.publish_on_init && !self.config.published_path().exists() {
            match self.publish() {
                Ok(_) => report.published_seed = true,
                // Leave the store usable so the draft can be replaced
                Err(e @ StoreError::Malformed { .. }) => {
                    warn!("Skipping initial publish, draft is unreadable: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    // ==================== Draft ====================

    /// Get the current draft
    pub fn get_draft(&self) -> StoreResult<DraftRecord> {
        read_json(&self.config.draft_path())?.ok_or(StoreError::NotFound(RecordKind::Draft))
    }

    /// Replace the draft and record it in history
    ///
    /// The resume is stored as given; validation is the caller's job. The
    /// draft write must succeed for the call to succeed. A failing history
    /// append after that is logged and otherwise ignored, since the draft
    /// is already durable.
    pub fn save_draft(&self, resume: Resume) -> StoreResult<DraftRecord> {
        let previous = self.previous_draft_time();
        self.write_draft(resume, previous)
    }

    /// Replace the draft only if it is still at `expected_updated_at`
    ///
    /// Best-effort optimistic check: it narrows the window for lost updates
    /// between two editors but doesn't close it.
    pub fn save_draft_if_unchanged(
        &self,
        resume: Resume,
        expected_updated_at: DateTime<Utc>,
    ) -> StoreResult<DraftRecord> {
        let current = self.get_draft()?;
        if current.updated_at != expected_updated_at {
            return Err(StoreError::Conflict {
                expected: expected_updated_at,
                actual: current.updated_at,
            });
        }
        self.write_draft(resume, Some(current.updated_at))
    }

    fn write_draft(
        &self,
        resume: Resume,
        previous: Option<DateTime<Utc>>,
    ) -> StoreResult<DraftRecord> {
        let record = DraftRecord {
            updated_at: next_timestamp(previous),
            resume,
        };

        write_json(&self.config.draft_path(), &record)?;
        debug!("Saved draft at {}", record.updated_at);

        if let Err(e) = self.history.append(&record) {
            warn!(
                "Draft saved at {} but history append failed: {}",
                record.updated_at, e
            );
        }

        Ok(record)
    }

    /// Timestamp of the current draft, if one can be read
    fn previous_draft_time(&self) -> Option<DateTime<Utc>> {
        match self.get_draft() {
            Ok(draft) => Some(draft.updated_at),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => {
                warn!("Overwriting unreadable draft: {}", e);
                None
            }
        }
    }

    // ==================== Published ====================

    /// Get the published snapshot
    pub fn get_published(&self) -> StoreResult<PublishedRecord> {
        read_json(&self.config.published_path())?
            .ok_or(StoreError::NotFound(RecordKind::Published))
    }

    /// Copy the current draft into the published slot
    ///
    /// Does not touch history.
    pub fn publish(&self) -> StoreResult<PublishedRecord> {
        let draft = self.get_draft()?;
        let record = PublishedRecord {
            published_at: Utc::now(),
            resume: draft.resume,
        };

        write_json(&self.config.published_path(), &record)?;
        info!("Published draft from {}", draft.updated_at);
        Ok(record)
    }

    // ==================== History ====================

    /// Re-apply a history entry as a new draft save
    ///
    /// Produces a fresh draft and one more history entry; nothing is
    /// rewound. Unknown or invalid ids are `NotFound` and change nothing.
    pub fn restore(&self, id: &str) -> StoreResult<DraftRecord> {
        let entry = self.history.get(id)?;
        let record = self.save_draft(entry.resume)?;
        info!("Restored draft from history entry {}", entry.id);
        Ok(record)
    }

    // ==================== Stats ====================

    /// Report what is currently on disk
    pub fn stats(&self) -> StoreResult<StorageStats> {
        let draft = self.get_draft().ok();
        let published = self.get_published().ok();

        Ok(StorageStats {
            draft_exists: self.config.draft_path().exists(),
            published_exists: self.config.published_path().exists(),
            draft_updated_at: draft.map(|d| d.updated_at),
            published_at: published.map(|p| p.published_at),
            history_entries: self.history.count()?,
            total_size: dir_size(&self.config.data_dir),
        })
    }
}

/// Now, but never earlier than the previous draft's timestamp
fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if prev > now => prev,
        _ => now,
    }
}
