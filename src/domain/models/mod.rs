pub mod candidate;
pub mod file_record;
pub mod stats;
