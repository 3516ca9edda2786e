//! Data models for Folio
//!
//! The `Resume` document and its sub-entities, plus the records the store
//! persists around it (draft, published snapshot, history entries).
//!
//! Every document object keeps the fields it knows about as typed members and
//! collects anything else into an `extra` map, so documents written by newer
//! editors survive a round trip through this crate untouched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::history_id::HistoryId;

/// Unknown key/value pairs carried through from the input document
pub type Extra = Map<String, Value>;

/// The versioned resume document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub profile: Profile,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub site: Site,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Resume {
    /// Blank document used when no seed is available
    pub fn empty() -> Self {
        Self {
            profile: Profile::default(),
            experience: Vec::new(),
            projects: Vec::new(),
            skills: Vec::new(),
            education: Vec::new(),
            site: Site::default(),
            extra: Extra::new(),
        }
    }

    /// Parse a resume from YAML text
    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(input)
    }
}

/// Identity and contact details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub avatar: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Social links keyed by network name (github, linkedin, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One employment entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub position: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: Vec<String>,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub highlights: Vec<String>,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProjectImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<ProjectCommit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub src: String,
    pub alt: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A sample commit shown on a project page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCommit {
    pub hash: String,
    pub message: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<SkillItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillItem {
    pub name: String,
    /// Proficiency in [0, 100]. Kept as a JSON number so `80` stays `80`.
    pub level: Number,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SkillItem {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level: Number::from(level),
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Presentation metadata for the rendered site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub theme: Theme,
    pub language: String,
    /// Analytics property id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            title: "My Resume".to_string(),
            description: String::new(),
            keywords: None,
            theme: Theme::Auto,
            language: "zh-CN".to_string(),
            analytics: None,
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// The single current draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub updated_at: DateTime<Utc>,
    pub resume: Resume,
}

/// The single public snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedRecord {
    pub published_at: DateTime<Utc>,
    pub resume: Resume,
}

/// A full history snapshot, as returned by a lookup
///
/// On disk the entry is stored as a `DraftRecord`; the id is its file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: HistoryId,
    pub updated_at: DateTime<Utc>,
    pub resume: Resume,
}

impl HistoryRecord {
    pub fn from_draft(id: HistoryId, record: DraftRecord) -> Self {
        Self {
            id,
            updated_at: record.updated_at,
            resume: record.resume,
        }
    }
}

/// Summary line for history listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryId,
    /// `None` when the stored timestamp is missing or unparseable
    pub updated_at: Option<DateTime<Utc>>,
    pub profile_name: String,
    pub profile_title: String,
}

/// One page of history listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    /// Number of readable entries, regardless of the page limit
    pub total: usize,
    pub items: Vec<HistoryEntry>,
}
