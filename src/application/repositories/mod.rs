pub mod file_record_repository;
pub mod upload_config_repository;
