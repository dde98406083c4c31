use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    application::{
        dto::file_record_patch::FileRecordPatch, error::ApplicationError,
        repositories::file_record_repository::FileRecordRepository,
    },
    domain::models::file_record::FileRecord,
};

/// Ephemeral store for local and demo use: a plain in-process vector in
/// insertion order. Mutations take the lock only for the duration of the
/// mutation, never across an await.
pub struct MemoryFileRecordRepository {
    files: Mutex<Vec<FileRecord>>,
}

impl MemoryFileRecordRepository {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(Vec::new()),
        }
    }

    fn next_id(files: &[FileRecord]) -> String {
        let max = files
            .iter()
            .filter_map(|file| file.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

impl Default for MemoryFileRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileRecordRepository for MemoryFileRecordRepository {
    async fn list(&self) -> Result<Vec<FileRecord>, ApplicationError> {
        Ok(self.files.lock().unwrap().clone())
    }

    async fn create(&self, record: FileRecord) -> Result<FileRecord, ApplicationError> {
        let mut files = self.files.lock().unwrap();

        let mut record = record;
        if record.id.is_empty() {
            record.id = Self::next_id(&files);
        } else if files.iter().any(|file| file.id == record.id) {
            return Err(ApplicationError::Persistence(format!(
                "duplicate record id '{}'",
                record.id
            )));
        }

        files.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        patch: FileRecordPatch,
    ) -> Result<FileRecord, ApplicationError> {
        let mut files = self.files.lock().unwrap();
        let record = files
            .iter_mut()
            .find(|file| file.id == id)
            .ok_or(ApplicationError::NotFound)?;

        patch.apply(record);
        Ok(record.clone())
    }

    async fn remove(&self, id: &str) -> Result<bool, ApplicationError> {
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|file| file.id != id);
        Ok(files.len() < before)
    }

    async fn clear(&self) -> Result<(), ApplicationError> {
        self.files.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::candidate::CandidateFile;

    fn record(id: &str) -> FileRecord {
        let mut record = FileRecord::register(&CandidateFile::new(
            "photo.jpg".to_string(),
            2048,
            "image/jpeg".to_string(),
        ));
        record.id = id.to_string();
        record
    }

    #[tokio::test]
    async fn assigns_sequential_ids_when_absent() {
        let repository = MemoryFileRecordRepository::new();
        let first = repository.create(record("")).await.unwrap();
        let second = repository.create(record("")).await.unwrap();
        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
    }

    #[tokio::test]
    async fn keeps_client_assigned_ids() {
        let repository = MemoryFileRecordRepository::new();
        let stored = repository.create(record("abc-123")).await.unwrap();
        assert_eq!(stored.id, "abc-123");
    }

    #[tokio::test]
    async fn rejects_duplicate_ids() {
        let repository = MemoryFileRecordRepository::new();
        repository.create(record("dup")).await.unwrap();
        let result = repository.create(record("dup")).await;
        assert!(matches!(result, Err(ApplicationError::Persistence(_))));
    }

    #[tokio::test]
    async fn update_merges_only_provided_fields() {
        let repository = MemoryFileRecordRepository::new();
        let stored = repository.create(record("1")).await.unwrap();

        let updated = repository
            .update(&stored.id, FileRecordPatch::progress(40))
            .await
            .unwrap();

        assert_eq!(updated.progress, 40);
        assert_eq!(updated.status, stored.status);
        assert_eq!(updated.name, stored.name);
        assert!(updated.error.is_none());
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let repository = MemoryFileRecordRepository::new();
        let result = repository
            .update("missing", FileRecordPatch::completed())
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound)));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let repository = MemoryFileRecordRepository::new();
        repository.create(record("1")).await.unwrap();

        assert!(repository.remove("1").await.unwrap());
        assert!(!repository.remove("1").await.unwrap());
    }

    #[tokio::test]
    async fn clear_empties_the_store_and_tolerates_repeats() {
        let repository = MemoryFileRecordRepository::new();
        repository.create(record("1")).await.unwrap();
        repository.create(record("2")).await.unwrap();

        repository.clear().await.unwrap();
        assert!(repository.list().await.unwrap().is_empty());

        repository.clear().await.unwrap();
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repository = MemoryFileRecordRepository::new();
        for id in ["a", "b", "c"] {
            repository.create(record(id)).await.unwrap();
        }
        repository.create(record("")).await.unwrap();

        let ids: Vec<_> = repository
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|file| file.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "1"]);
    }
}
