use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    application::{
        dto::file_record_patch::FileRecordPatch, error::ApplicationError,
        repositories::file_record_repository::FileRecordRepository,
    },
    domain::models::file_record::{FileRecord, UploadStatus},
};

/// Remote-backed store: serializes records to and from the tabular records
/// API. The server assigns ids on create; rows come back in server order,
/// which is stable between mutations.
pub struct RestFileRecordRepository {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

/// Wire shape of one table row. Custom fields carry the `_c` suffix the
/// records API uses for non-system columns.
#[derive(Debug, Serialize, Deserialize)]
struct RecordRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "size_c")]
    size: u64,
    #[serde(rename = "type_c")]
    mime_type: String,
    #[serde(rename = "status_c")]
    status: UploadStatus,
    #[serde(rename = "progress_c")]
    progress: u8,
    #[serde(rename = "uploaded_at_c")]
    uploaded_at: DateTime<Utc>,
    #[serde(rename = "error_c", skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(rename = "preview_c", skip_serializing_if = "Option::is_none")]
    preview: Option<String>,
    // Raw content is owned by the storage backend. Rows written by other
    // clients may carry it; this service never sends it.
    #[serde(rename = "file_content_c", skip_serializing_if = "Option::is_none")]
    file_content: Option<String>,
}

#[derive(Debug, Serialize)]
struct RecordRowPatch {
    #[serde(rename = "status_c", skip_serializing_if = "Option::is_none")]
    status: Option<UploadStatus>,
    #[serde(rename = "progress_c", skip_serializing_if = "Option::is_none")]
    progress: Option<u8>,
    #[serde(rename = "error_c", skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(rename = "preview_c", skip_serializing_if = "Option::is_none")]
    preview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RowEnvelope {
    data: RecordRow,
}

#[derive(Debug, Deserialize)]
struct RowListEnvelope {
    data: Vec<RecordRow>,
}

impl RecordRow {
    fn from_record(record: &FileRecord) -> Self {
        Self {
            // The server assigns row ids; a client-generated in-flight id is
            // superseded by the stored one.
            id: None,
            name: record.name.clone(),
            size: record.size,
            mime_type: record.mime_type.clone(),
            status: record.status,
            progress: record.progress,
            uploaded_at: record.uploaded_at,
            error: record.error.clone(),
            preview: record.preview.clone(),
            file_content: None,
        }
    }

    fn into_record(self) -> FileRecord {
        FileRecord {
            id: self.id.map(|id| id.to_string()).unwrap_or_default(),
            name: self.name,
            size: self.size,
            mime_type: self.mime_type,
            status: self.status,
            progress: self.progress,
            uploaded_at: self.uploaded_at,
            error: self.error,
            preview: self.preview,
        }
    }
}

impl From<FileRecordPatch> for RecordRowPatch {
    fn from(patch: FileRecordPatch) -> Self {
        Self {
            status: patch.status,
            progress: patch.progress,
            error: patch.error,
            preview: patch.preview,
        }
    }
}

impl RestFileRecordRepository {
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
        }
    }

    fn records_url(&self) -> String {
        format!("{}/tables/{}/records", self.base_url, self.table)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/tables/{}/records/{}", self.base_url, self.table, id)
    }
}

#[async_trait]
impl FileRecordRepository for RestFileRecordRepository {
    async fn list(&self) -> Result<Vec<FileRecord>, ApplicationError> {
        let response = self
            .client
            .get(self.records_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Persistence(format!(
                "List failed with status: {}",
                response.status()
            )));
        }

        let envelope: RowListEnvelope = response
            .json()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        Ok(envelope
            .data
            .into_iter()
            .map(RecordRow::into_record)
            .collect())
    }

    async fn create(&self, record: FileRecord) -> Result<FileRecord, ApplicationError> {
        let row = RecordRow::from_record(&record);

        let response = self
            .client
            .post(self.records_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({ "data": row }))
            .send()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Persistence(format!(
                "Create failed with status: {}",
                response.status()
            )));
        }

        let envelope: RowEnvelope = response
            .json()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        Ok(envelope.data.into_record())
    }

    async fn update(
        &self,
        id: &str,
        patch: FileRecordPatch,
    ) -> Result<FileRecord, ApplicationError> {
        let row_patch = RecordRowPatch::from(patch);

        let response = self
            .client
            .patch(self.record_url(id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({ "data": row_patch }))
            .send()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(ApplicationError::NotFound);
        }

        if !response.status().is_success() {
            return Err(ApplicationError::Persistence(format!(
                "Update failed with status: {}",
                response.status()
            )));
        }

        let envelope: RowEnvelope = response
            .json()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        Ok(envelope.data.into_record())
    }

    async fn remove(&self, id: &str) -> Result<bool, ApplicationError> {
        let response = self
            .client
            .delete(self.record_url(id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Ok(false);
        }

        if !response.status().is_success() {
            return Err(ApplicationError::Persistence(format!(
                "Delete failed with status: {}",
                response.status()
            )));
        }

        Ok(true)
    }

    async fn clear(&self) -> Result<(), ApplicationError> {
        let response = self
            .client
            .delete(self.records_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Persistence(format!(
                "Clear failed with status: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::candidate::CandidateFile;

    #[test]
    fn row_serialization_uses_table_column_names() {
        let record = FileRecord::register(&CandidateFile::new(
            "photo.jpg".to_string(),
            2048,
            "image/jpeg".to_string(),
        ));
        let row = RecordRow::from_record(&record);
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["Name"], "photo.jpg");
        assert_eq!(value["size_c"], 2048);
        assert_eq!(value["type_c"], "image/jpeg");
        assert_eq!(value["status_c"], "preparing");
        assert_eq!(value["progress_c"], 0);
        // Absent optionals and the server-assigned id are omitted.
        assert!(value.get("Id").is_none());
        assert!(value.get("error_c").is_none());
        assert!(value.get("file_content_c").is_none());
    }

    #[test]
    fn row_deserialization_adopts_the_server_id() {
        let row: RecordRow = serde_json::from_value(serde_json::json!({
            "Id": 42,
            "Name": "report.pdf",
            "size_c": 100,
            "type_c": "application/pdf",
            "status_c": "completed",
            "progress_c": 100,
            "uploaded_at_c": "2026-01-15T10:30:00Z",
            "file_content_c": "aGVsbG8="
        }))
        .unwrap();

        let record = row.into_record();
        assert_eq!(record.id, "42");
        assert_eq!(record.status, UploadStatus::Completed);
        assert_eq!(record.progress, 100);
        assert!(record.error.is_none());
    }

    #[test]
    fn patch_serializes_only_provided_fields() {
        let patch = RecordRowPatch::from(FileRecordPatch::progress(55));
        let value = serde_json::to_value(&patch).unwrap();

        assert_eq!(value["progress_c"], 55);
        assert!(value.get("status_c").is_none());
        assert!(value.get("error_c").is_none());
    }
}
