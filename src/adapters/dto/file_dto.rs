use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    format::{format_file_size, FileKind},
    models::{
        file_record::{FileRecord, UploadStatus},
        stats::UploadStats,
    },
};

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "sizeLabel")]
    pub size_label: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub kind: FileKind,
    pub status: UploadStatus,
    pub progress: u8,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            size: record.size,
            size_label: format_file_size(record.size),
            kind: FileKind::from_mime(&record.mime_type),
            mime_type: record.mime_type,
            status: record.status,
            progress: record.progress,
            uploaded_at: record.uploaded_at,
            error: record.error,
            preview: record.preview,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadBatchResponse {
    pub accepted: Vec<FileResponse>,
    pub rejections: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(rename = "totalFiles")]
    pub total_files: usize,
    #[serde(rename = "completedFiles")]
    pub completed_files: usize,
    #[serde(rename = "uploadingFiles")]
    pub uploading_files: usize,
    #[serde(rename = "failedFiles")]
    pub failed_files: usize,
    #[serde(rename = "totalSize")]
    pub total_size: u64,
    #[serde(rename = "totalSizeLabel")]
    pub total_size_label: String,
    #[serde(rename = "completedSize")]
    pub completed_size: u64,
    #[serde(rename = "completedSizeLabel")]
    pub completed_size_label: String,
}

impl From<UploadStats> for StatsResponse {
    fn from(stats: UploadStats) -> Self {
        Self {
            total_files: stats.total_files,
            completed_files: stats.completed_files,
            uploading_files: stats.uploading_files,
            failed_files: stats.failed_files,
            total_size: stats.total_size,
            total_size_label: format_file_size(stats.total_size),
            completed_size: stats.completed_size,
            completed_size_label: format_file_size(stats.completed_size),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveQuery {
    pub confirm: Option<bool>,
}
