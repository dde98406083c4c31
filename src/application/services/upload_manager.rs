use std::{sync::Arc, time::Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    application::{
        dto::file_record_patch::FileRecordPatch,
        error::ApplicationError,
        repositories::file_record_repository::FileRecordRepository,
        services::upload_transport::{TransportError, UploadTransport},
    },
    domain::{
        config::upload::UploadConfig,
        format::{
            calculate_upload_speed, estimated_seconds_remaining, format_duration,
            format_file_size, format_upload_speed,
        },
        models::{
            candidate::CandidateFile,
            file_record::{FileRecord, UploadStatus},
        },
        validation::partition_candidates,
    },
};

/// Progress notifications for a submitted batch. Rejections are returned
/// synchronously from `submit`; only lifecycle updates flow through here.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    Progress(FileRecord),
    Completed(FileRecord),
    Failed(FileRecord),
}

#[derive(Debug)]
pub struct SubmitOutcome {
    pub accepted: Vec<FileRecord>,
    pub rejections: Vec<String>,
    pub events: mpsc::UnboundedReceiver<UploadEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    NotFound,
    /// The target is still uploading; the caller must confirm before the
    /// deletion proceeds. Nothing was changed.
    ConfirmationRequired,
}

/// Drives candidate files through validation, registration and transfer,
/// persisting every tick and surfacing the merged records to the caller.
pub struct UploadManager {
    repository: Arc<dyn FileRecordRepository>,
    transport: Arc<dyn UploadTransport>,
    config: UploadConfig,
}

impl UploadManager {
    pub fn new(
        repository: Arc<dyn FileRecordRepository>,
        transport: Arc<dyn UploadTransport>,
        config: UploadConfig,
    ) -> Self {
        Self {
            repository,
            transport,
            config,
        }
    }

    /// Validates the batch, registers every accepted file with status
    /// `preparing`, then drives each one independently. A failure to register
    /// or upload one file never aborts its siblings.
    pub async fn submit(&self, candidates: Vec<CandidateFile>) -> SubmitOutcome {
        let batch = partition_candidates(candidates, &self.config);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut accepted = Vec::with_capacity(batch.accepted.len());

        for candidate in batch.accepted {
            let record = FileRecord::register(&candidate);
            let stored = match self.repository.create(record.clone()).await {
                Ok(stored) => stored,
                Err(err) => {
                    warn!("Could not register {}: {}", candidate.name, err);
                    let mut failed = record;
                    failed.status = UploadStatus::Error;
                    failed.error = Some(err.to_string());
                    let _ = events_tx.send(UploadEvent::Failed(failed));
                    continue;
                }
            };

            accepted.push(stored.clone());
            tokio::spawn(drive_upload(
                Arc::clone(&self.repository),
                Arc::clone(&self.transport),
                events_tx.clone(),
                stored,
            ));
        }

        SubmitOutcome {
            accepted,
            rejections: batch.rejections,
            events: events_rx,
        }
    }

    /// Deletes one record. Removal of an in-flight upload is gated on
    /// explicit confirmation; declining leaves the record untouched.
    pub async fn remove(
        &self,
        id: &str,
        confirmed: bool,
    ) -> Result<RemovalOutcome, ApplicationError> {
        let records = self.repository.list().await?;
        let Some(target) = records.iter().find(|record| record.id == id) else {
            return Ok(RemovalOutcome::NotFound);
        };

        if target.status == UploadStatus::Uploading && !confirmed {
            return Ok(RemovalOutcome::ConfirmationRequired);
        }

        let removed = self.repository.remove(id).await?;
        Ok(if removed {
            RemovalOutcome::Removed
        } else {
            RemovalOutcome::NotFound
        })
    }

    /// Deletes every record, gated the same way as single removal while any
    /// upload is still in flight.
    pub async fn clear_all(&self, confirmed: bool) -> Result<RemovalOutcome, ApplicationError> {
        let records = self.repository.list().await?;
        if !confirmed
            && records
                .iter()
                .any(|record| record.status == UploadStatus::Uploading)
        {
            return Ok(RemovalOutcome::ConfirmationRequired);
        }

        self.repository.clear().await?;
        Ok(RemovalOutcome::Removed)
    }
}

/// One file's lifecycle: consume transfer ticks, persist each one, settle to
/// a terminal state. Runs as its own task so siblings interleave freely.
async fn drive_upload(
    repository: Arc<dyn FileRecordRepository>,
    transport: Arc<dyn UploadTransport>,
    events: mpsc::UnboundedSender<UploadEvent>,
    mut record: FileRecord,
) {
    let started = Instant::now();

    // Capacity 1 so the transport hands over each tick before computing the
    // next; ticks for one file are therefore persisted strictly in order.
    let (progress_tx, mut progress_rx) = mpsc::channel::<u8>(1);
    let transfer = {
        let transport = Arc::clone(&transport);
        let size = record.size;
        tokio::spawn(async move { transport.transfer(size, progress_tx).await })
    };

    while let Some(progress) = progress_rx.recv().await {
        let patch = FileRecordPatch {
            status: (record.status == UploadStatus::Preparing).then_some(UploadStatus::Uploading),
            ..FileRecordPatch::progress(progress)
        };
        match repository.update(&record.id, patch).await {
            Ok(updated) => {
                record = updated;
                let transferred = record.size / 100 * u64::from(progress);
                let speed = calculate_upload_speed(transferred, started.elapsed().as_secs_f64());
                debug!(
                    "{}: {}%, ~{} remaining",
                    record.name,
                    progress,
                    format_duration(estimated_seconds_remaining(record.size, transferred, speed))
                );
                let _ = events.send(UploadEvent::Progress(record.clone()));
            }
            // Removed mid-flight: drop the remaining ticks and go quiet.
            Err(ApplicationError::NotFound) => return,
            Err(err) => {
                warn!("Could not persist progress for {}: {}", record.id, err);
                record.status = UploadStatus::Error;
                record.error = Some(err.to_string());
                let _ = events.send(UploadEvent::Failed(record));
                return;
            }
        }
    }

    let settled = match transfer.await {
        Ok(settled) => settled,
        Err(err) => {
            warn!("Transfer task for {} aborted: {}", record.id, err);
            Err(TransportError::Cancelled)
        }
    };

    let (patch, failed) = match settled {
        Ok(()) => (FileRecordPatch::completed(), false),
        Err(err) => (FileRecordPatch::failed(err.to_string()), true),
    };

    match repository.update(&record.id, patch).await {
        Ok(updated) => {
            let event = if failed {
                UploadEvent::Failed(updated)
            } else {
                let elapsed = started.elapsed();
                info!(
                    "{} ({}) uploaded in {} at {}",
                    updated.name,
                    format_file_size(updated.size),
                    format_duration(elapsed.as_secs()),
                    format_upload_speed(calculate_upload_speed(
                        updated.size,
                        elapsed.as_secs_f64()
                    ))
                );
                UploadEvent::Completed(updated)
            };
            let _ = events.send(event);
        }
        Err(ApplicationError::NotFound) => {}
        Err(err) => {
            warn!("Could not settle record {}: {}", record.id, err);
            record.status = UploadStatus::Error;
            record.error = Some(err.to_string());
            let _ = events.send(UploadEvent::Failed(record));
        }
    }
}
