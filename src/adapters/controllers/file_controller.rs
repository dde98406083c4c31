use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::file_dto::{FileResponse, RemoveQuery, StatsResponse, UploadBatchResponse},
        state::AppState,
    },
    application::{
        error::ApplicationError,
        services::upload_manager::{RemovalOutcome, UploadEvent},
    },
    domain::models::{candidate::CandidateFile, stats::UploadStats},
};

pub struct FileController;

impl FileController {
    /// GET /api/v1/files
    pub async fn list_files(
        State(app_state): State<AppState>,
    ) -> Result<Json<Vec<FileResponse>>, ApplicationError> {
        let records = app_state.repository.list().await?;
        Ok(Json(records.into_iter().map(FileResponse::from).collect()))
    }

    /// GET /api/v1/files/stats
    pub async fn get_stats(
        State(app_state): State<AppState>,
    ) -> Result<Json<StatsResponse>, ApplicationError> {
        let records = app_state.repository.list().await?;
        Ok(Json(StatsResponse::from(UploadStats::from_records(
            &records,
        ))))
    }

    /// GET /api/v1/files/{file_id}
    pub async fn get_file(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        let records = app_state.repository.list().await?;
        let record = records
            .into_iter()
            .find(|record| record.id == file_id)
            .ok_or(ApplicationError::NotFound)?;
        Ok(Json(FileResponse::from(record)))
    }

    /// Submits a batch of candidate files. Accepted files are registered
    /// before the response is sent; progress continues in background tasks
    /// and clients observe it through the file list.
    /// POST /api/v1/files (multipart, one or more `file` parts)
    pub async fn upload_files(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<UploadBatchResponse>), ApplicationError> {
        let mut candidates = Vec::new();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            if field.name() != Some("file") {
                continue;
            }

            let name = field.file_name().unwrap_or("unnamed").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let content = field
                .bytes()
                .await
                .map_err(|e| {
                    warn!("Cannot read file bytes: {}", e);
                    ApplicationError::BadRequest("Invalid file data".to_string())
                })?
                .to_vec();

            candidates.push(CandidateFile::with_content(name, mime_type, content));
        }

        if candidates.is_empty() {
            warn!("Missing required 'file' field in upload");
            return Err(ApplicationError::BadRequest(
                "Missing required field".to_string(),
            ));
        }

        info!("Submitting batch of {} candidate files", candidates.len());
        let outcome = app_state.upload_manager.submit(candidates).await;

        for rejection in &outcome.rejections {
            warn!("Candidate rejected: {}", rejection);
        }

        tokio::spawn(log_upload_events(outcome.events));

        Ok((
            StatusCode::ACCEPTED,
            Json(UploadBatchResponse {
                accepted: outcome
                    .accepted
                    .into_iter()
                    .map(FileResponse::from)
                    .collect(),
                rejections: outcome.rejections,
            }),
        ))
    }

    /// DELETE /api/v1/files/{file_id}?confirm=true
    pub async fn remove_file(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
        Query(query): Query<RemoveQuery>,
    ) -> Result<Response, ApplicationError> {
        let confirmed = query.confirm.unwrap_or(false);

        match app_state.upload_manager.remove(&file_id, confirmed).await? {
            RemovalOutcome::Removed => {
                info!("File {} removed", file_id);
                Ok(StatusCode::NO_CONTENT.into_response())
            }
            RemovalOutcome::NotFound => Err(ApplicationError::NotFound),
            RemovalOutcome::ConfirmationRequired => Ok(confirmation_required(
                "This file is still uploading. Pass confirm=true to cancel it.",
            )),
        }
    }

    /// DELETE /api/v1/files?confirm=true
    pub async fn clear_files(
        State(app_state): State<AppState>,
        Query(query): Query<RemoveQuery>,
    ) -> Result<Response, ApplicationError> {
        let confirmed = query.confirm.unwrap_or(false);

        match app_state.upload_manager.clear_all(confirmed).await? {
            RemovalOutcome::ConfirmationRequired => Ok(confirmation_required(
                "Uploads are still in progress. Pass confirm=true to clear all files.",
            )),
            _ => {
                info!("All files cleared");
                Ok(StatusCode::NO_CONTENT.into_response())
            }
        }
    }
}

fn confirmation_required(message: &str) -> Response {
    (
        StatusCode::CONFLICT,
        Json(json!({
            "error": message,
            "confirmationRequired": true,
        })),
    )
        .into_response()
}

async fn log_upload_events(mut events: mpsc::UnboundedReceiver<UploadEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            UploadEvent::Progress(_) => {}
            UploadEvent::Completed(record) => {
                info!("{} uploaded successfully", record.name);
            }
            UploadEvent::Failed(record) => {
                warn!(
                    "Failed to upload {}: {}",
                    record.name,
                    record.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }
}
