//! Batch validation for candidate files.
//!
//! Rules are applied per file in submission order, first failing rule wins:
//! batch count, then size, then type. Rejections carry the human-readable
//! reason shown to the user.

use crate::domain::{config::upload::UploadConfig, models::candidate::CandidateFile};

#[derive(Debug)]
pub struct BatchValidation {
    pub accepted: Vec<CandidateFile>,
    pub rejections: Vec<String>,
}

pub fn partition_candidates(
    candidates: Vec<CandidateFile>,
    config: &UploadConfig,
) -> BatchValidation {
    let mut accepted = Vec::new();
    let mut rejections = Vec::new();

    for candidate in candidates {
        if accepted.len() >= config.max_files {
            rejections.push(format!("Maximum {} files allowed", config.max_files));
            continue;
        }

        if candidate.size > config.max_file_size {
            rejections.push(format!(
                "{} is too large (max {}MB)",
                candidate.name,
                config.max_file_size / 1024 / 1024
            ));
            continue;
        }

        if !is_type_allowed(&candidate.name, &candidate.mime_type, &config.allowed_types) {
            rejections.push(format!("{} is not an allowed file type", candidate.name));
            continue;
        }

        accepted.push(candidate);
    }

    BatchValidation {
        accepted,
        rejections,
    }
}

/// Entries starting with `.` match the filename suffix; anything else is
/// matched as a substring of the MIME type. Both case-insensitive. An empty
/// list allows everything.
pub fn is_type_allowed(name: &str, mime_type: &str, allowed_types: &[String]) -> bool {
    if allowed_types.is_empty() {
        return true;
    }

    let name = name.to_lowercase();
    let mime_type = mime_type.to_lowercase();

    allowed_types.iter().any(|entry| {
        let entry = entry.to_lowercase();
        if entry.starts_with('.') {
            name.ends_with(&entry)
        } else {
            mime_type.contains(&entry)
        }
    })
}
