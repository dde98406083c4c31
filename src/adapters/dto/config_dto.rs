use serde::Serialize;

use crate::domain::{config::upload::UploadConfig, format::format_file_size};

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(rename = "maxFileSize")]
    pub max_file_size: u64,
    #[serde(rename = "maxFileSizeLabel")]
    pub max_file_size_label: String,
    #[serde(rename = "maxFiles")]
    pub max_files: usize,
    #[serde(rename = "allowedTypes")]
    pub allowed_types: Vec<String>,
}

impl From<&UploadConfig> for ConfigResponse {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            max_file_size_label: format_file_size(config.max_file_size),
            max_files: config.max_files,
            allowed_types: config.allowed_types.clone(),
        }
    }
}
