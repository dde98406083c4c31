use serde::{Deserialize, Serialize};

use crate::domain::models::file_record::{FileRecord, UploadStatus};

/// Partial update for a stored record. Fields left at `None` are not touched
/// by the merge, so callers state exactly what they change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileRecordPatch {
    pub status: Option<UploadStatus>,
    pub progress: Option<u8>,
    pub error: Option<String>,
    pub preview: Option<String>,
}

impl FileRecordPatch {
    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }

    pub fn completed() -> Self {
        Self {
            status: Some(UploadStatus::Completed),
            progress: Some(100),
            ..Self::default()
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            status: Some(UploadStatus::Error),
            error: Some(message),
            ..Self::default()
        }
    }

    /// Merge the provided fields into `record`. Progress is applied before
    /// any status change so a settling patch still lands its final value,
    /// while records that are already terminal accept no progress mutation.
    pub fn apply(&self, record: &mut FileRecord) {
        if let Some(progress) = self.progress {
            if !record.status.is_terminal() {
                record.progress = progress;
            }
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(error) = &self.error {
            record.error = Some(error.clone());
        }
        if let Some(preview) = &self.preview {
            record.preview = Some(preview.clone());
        }
    }
}
