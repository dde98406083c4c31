use axum::{extract::State, Json};

use crate::adapters::{dto::config_dto::ConfigResponse, state::AppState};

pub struct ConfigController;

impl ConfigController {
    /// Effective upload policy for this session
    /// GET /api/v1/config
    pub async fn get_config(State(app_state): State<AppState>) -> Json<ConfigResponse> {
        Json(ConfigResponse::from(app_state.config.as_ref()))
    }
}
