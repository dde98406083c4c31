mod memory_file_record_repository;
mod rest_file_record_repository;
mod rest_upload_config_repository;

pub use memory_file_record_repository::MemoryFileRecordRepository;
pub use rest_file_record_repository::RestFileRecordRepository;
pub use rest_upload_config_repository::RestUploadConfigRepository;
