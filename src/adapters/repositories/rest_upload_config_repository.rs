use async_trait::async_trait;
use reqwest::Client;

use crate::{
    application::{
        error::ApplicationError,
        repositories::upload_config_repository::UploadConfigRepository,
    },
    domain::config::upload::UploadConfig,
};

/// Fetches the upload policy document once at startup. Callers fall back to
/// static defaults when the provider is unreachable.
pub struct RestUploadConfigRepository {
    client: Client,
    config_url: String,
    api_key: Option<String>,
}

impl RestUploadConfigRepository {
    pub fn new(config_url: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            config_url,
            api_key,
        }
    }
}

#[async_trait]
impl UploadConfigRepository for RestUploadConfigRepository {
    async fn get_upload_config(&self) -> Result<UploadConfig, ApplicationError> {
        let mut request = self.client.get(&self.config_url);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Persistence(format!(
                "Config fetch failed with status: {}",
                response.status()
            )));
        }

        response
            .json::<UploadConfig>()
            .await
            .map_err(|e| ApplicationError::Persistence(e.to_string()))
    }
}
