use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::config::upload::UploadConfig};

#[async_trait]
pub trait UploadConfigRepository: Send + Sync {
    async fn get_upload_config(&self) -> Result<UploadConfig, ApplicationError>;
}
