use std::sync::Arc;

use crate::{
    application::{
        repositories::file_record_repository::FileRecordRepository,
        services::upload_manager::UploadManager,
    },
    domain::config::{provider::StoreProvider, upload::UploadConfig},
};

#[derive(Clone)]
pub struct AppState {
    pub provider: StoreProvider,
    pub config: Arc<UploadConfig>,
    pub repository: Arc<dyn FileRecordRepository>,
    pub upload_manager: Arc<UploadManager>,
}
