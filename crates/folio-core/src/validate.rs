//! Document validation
//!
//! Deserializing into `Resume` already enforces required fields, field types
//! and the theme enum. This module covers the rules that types can't carry.
//! Callers validate before handing a document to the store; the store
//! itself accepts whatever it is given.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::models::Resume;

/// A single rule violation, located by a JSON-pointer-like path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All violations found in a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid resume: {}", format_issues(.0))]
pub struct ValidationErrors(pub Vec<ValidationIssue>);

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check a resume against the rules the type system doesn't express
pub fn validate(resume: &Resume) -> Result<(), ValidationErrors> {
    let mut issues = Vec::new();

    for (c, category) in resume.skills.iter().enumerate() {
        for (i, item) in category.items.iter().enumerate() {
            let in_range = item
                .level
                .as_f64()
                .is_some_and(|level| level.is_finite() && (0.0..=100.0).contains(&level));
            if !in_range {
                issues.push(ValidationIssue {
                    path: format!("/skills/{}/items/{}/level", c, i),
                    message: format!("level {} is outside 0-100", item.level),
                });
            }
        }
    }

    let mut slugs = HashSet::new();
    for (p, project) in resume.projects.iter().enumerate() {
        let path = format!("/projects/{}/slug", p);
        if project.slug.trim().is_empty() {
            issues.push(ValidationIssue {
                path,
                message: "slug must not be empty".to_string(),
            });
        } else if !slugs.insert(project.slug.as_str()) {
            issues.push(ValidationIssue {
                path,
                message: format!("duplicate slug '{}'", project.slug),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(issues))
    }
}
