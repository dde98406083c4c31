use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::candidate::CandidateFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Preparing,
    Uploading,
    Completed,
    Error,
}

impl UploadStatus {
    /// Terminal records accept no further progress mutation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub status: UploadStatus,
    pub progress: u8,
    pub uploaded_at: DateTime<Utc>,
    pub error: Option<String>,
    pub preview: Option<String>,
}

impl FileRecord {
    /// A freshly registered record: client-assigned id, zero progress,
    /// preview rendered when the candidate carries previewable content.
    pub fn register(candidate: &CandidateFile) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: candidate.name.clone(),
            size: candidate.size,
            mime_type: candidate.mime_type.clone(),
            status: UploadStatus::Preparing,
            progress: 0,
            uploaded_at: Utc::now(),
            error: None,
            preview: candidate.preview(),
        }
    }
}
