//! Human-readable comparison of two resumes
//!
//! Flattens each document into a handful of headline fields and section
//! counts, then reports the ones that differ. Lines always come out in the
//! same order: profile and site fields first, then section counts.

use crate::models::Resume;

/// Headline values of a resume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeSummary {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub site_title: String,
    pub theme: String,
    pub language: String,
    pub experience_count: usize,
    pub project_count: usize,
    pub skill_count: usize,
    pub education_count: usize,
}

impl ResumeSummary {
    pub fn of(resume: &Resume) -> Self {
        Self {
            name: resume.profile.name.clone(),
            title: resume.profile.title.clone(),
            location: resume.profile.location.clone(),
            email: resume.profile.email.clone(),
            site_title: resume.site.title.clone(),
            theme: resume.site.theme.as_str().to_string(),
            language: resume.site.language.clone(),
            experience_count: resume.experience.len(),
            project_count: resume.projects.len(),
            skill_count: resume.skills.len(),
            education_count: resume.education.len(),
        }
    }
}

/// Describe how `current` differs from `other`
///
/// Each line reads from `other` to `current`, e.g. `Name: "Ada" -> "Grace"`
/// when `other` is named Ada and `current` Grace. Equal fields are omitted,
/// so identical documents produce an empty list.
pub fn summarize(current: &Resume, other: &Resume) -> Vec<String> {
    let now = ResumeSummary::of(current);
    let then = ResumeSummary::of(other);

    let fields = [
        ("Name", &now.name, &then.name),
        ("Title", &now.title, &then.title),
        ("Location", &now.location, &then.location),
        ("Email", &now.email, &then.email),
        ("Site title", &now.site_title, &then.site_title),
        ("Theme", &now.theme, &then.theme),
        ("Language", &now.language, &then.language),
    ];
    let counts = [
        ("Experience", now.experience_count, then.experience_count),
        ("Projects", now.project_count, then.project_count),
        ("Skills", now.skill_count, then.skill_count),
        ("Education", now.education_count, then.education_count),
    ];

    let mut lines = Vec::new();

    for (label, current_value, other_value) in fields {
        if current_value != other_value {
            lines.push(format!(
                "{}: \"{}\" -> \"{}\"",
                label,
                display_value(other_value),
                display_value(current_value)
            ));
        }
    }

    for (label, current_count, other_count) in counts {
        if current_count != other_count {
            lines.push(format!(
                "{} count: {} -> {}",
                label, other_count, current_count
            ));
        }
    }

    lines
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}
