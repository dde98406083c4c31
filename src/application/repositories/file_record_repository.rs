use async_trait::async_trait;

use crate::{
    application::{dto::file_record_patch::FileRecordPatch, error::ApplicationError},
    domain::models::file_record::FileRecord,
};

/// Persistence contract for upload records. Implementations must keep
/// `list` order stable across calls with no intervening mutation; callers
/// may not assume anything beyond that.
#[async_trait]
pub trait FileRecordRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<FileRecord>, ApplicationError>;

    /// Stores the record, assigning an identifier when the given one is
    /// empty, and returns the stored value including its identifier.
    async fn create(&self, record: FileRecord) -> Result<FileRecord, ApplicationError>;

    /// Merges only the provided fields into the existing record.
    async fn update(
        &self,
        id: &str,
        patch: FileRecordPatch,
    ) -> Result<FileRecord, ApplicationError>;

    /// Idempotent; returns whether a record was actually deleted.
    async fn remove(&self, id: &str) -> Result<bool, ApplicationError>;

    async fn clear(&self) -> Result<(), ApplicationError>;
}
