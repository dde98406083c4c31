use crate::domain::models::file_record::{FileRecord, UploadStatus};

/// Aggregate view over the current record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadStats {
    pub total_files: usize,
    pub completed_files: usize,
    pub uploading_files: usize,
    pub failed_files: usize,
    pub total_size: u64,
    pub completed_size: u64,
}

impl UploadStats {
    pub fn from_records(records: &[FileRecord]) -> Self {
        let mut stats = UploadStats {
            total_files: records.len(),
            ..UploadStats::default()
        };
        for record in records {
            stats.total_size += record.size;
            match record.status {
                UploadStatus::Completed => {
                    stats.completed_files += 1;
                    stats.completed_size += record.size;
                }
                UploadStatus::Uploading => stats.uploading_files += 1,
                UploadStatus::Error => stats.failed_files += 1,
                UploadStatus::Preparing => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::candidate::CandidateFile;

    fn record(size: u64, status: UploadStatus) -> FileRecord {
        let mut record = FileRecord::register(&CandidateFile::new(
            "file.bin".to_string(),
            size,
            "application/octet-stream".to_string(),
        ));
        record.status = status;
        record
    }

    #[test]
    fn counts_by_status_and_sums_sizes() {
        let records = vec![
            record(100, UploadStatus::Completed),
            record(200, UploadStatus::Completed),
            record(50, UploadStatus::Uploading),
            record(25, UploadStatus::Error),
            record(10, UploadStatus::Preparing),
        ];

        let stats = UploadStats::from_records(&records);
        assert_eq!(stats.total_files, 5);
        assert_eq!(stats.completed_files, 2);
        assert_eq!(stats.uploading_files, 1);
        assert_eq!(stats.failed_files, 1);
        assert_eq!(stats.total_size, 385);
        assert_eq!(stats.completed_size, 300);
    }

    #[test]
    fn empty_record_set_is_all_zero() {
        assert_eq!(UploadStats::from_records(&[]), UploadStats::default());
    }
}
