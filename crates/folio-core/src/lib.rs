//! Folio Core Library
//!
//! This crate provides the persistent content store behind Folio, a resume
//! editor: the current editable draft, the snapshot exposed to the public,
//! and a queryable history of every saved draft.
//!
//! # Architecture
//!
//! - **Store**: draft and published slots, bootstrap, publish, restore
//! - **HistoryStore**: append-only log of draft saves, one file per entry
//! - **diff**: headline comparison of two resumes
//!
//! All state lives in JSON files under the configured data directory. Each
//! file is replaced atomically.
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open()?;
//!
//! // Save a new draft (validate first)
//! validate(&resume)?;
//! store.save_draft(resume)?;
//!
//! // Go live
//! store.publish()?;
//!
//! // Browse and restore history
//! let page = store.history().list(50)?;
//! store.restore(page.items[0].id.as_str())?;
//! ```
//!
//! # Modules
//!
//! - `store`: Content store (main entry point)
//! - `history`: Draft history
//! - `history_id`: Validated history identifiers
//! - `models`: Resume document and stored records
//! - `diff`: Resume comparison
//! - `validate`: Rules beyond what the types enforce
//! - `seed`: First-run seed document
//! - `storage`: Atomic JSON persistence and error types
//! - `config`: Application configuration

pub mod config;
pub mod diff;
pub mod history;
pub mod history_id;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;
pub mod validate;

pub use config::Config;
pub use diff::{summarize, ResumeSummary};
pub use history::{clamp_limit, HistoryStore, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, MIN_LIST_LIMIT};
pub use history_id::{HistoryId, HistoryIdError};
pub use models::{
    DraftRecord, HistoryEntry, HistoryPage, HistoryRecord, PublishedRecord, Resume, Theme,
};
pub use storage::{RecordKind, StorageStats, StoreError, StoreResult};
pub use store::{BootstrapReport, Store};
pub use validate::{validate, ValidationErrors, ValidationIssue};
