pub mod file_record_patch;
