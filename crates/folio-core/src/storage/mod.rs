//! Storage layer
//!
//! File-backed persistence for the content store.
//!
//! ## Layout
//!
//! - `draft.json`: the current draft
//! - `published.json`: the public snapshot
//! - `history/<id>.json`: one immutable file per saved draft

pub mod error;
pub mod persistence;
pub mod stats;

pub use error::{RecordKind, StoreError, StoreResult};
pub use persistence::{
    atomic_create, atomic_write, create_json, is_temp_file, read_json, write_json,
};
pub use stats::StorageStats;
