use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Upload failed due to network error")]
    Network,

    #[error("Upload cancelled")]
    Cancelled,
}

/// Moves one file's bytes and reports progress. The simulated implementation
/// is the default; a real network transport plugs in behind the same trait.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Pushes progress percentages into `progress`: strictly increasing,
    /// starting above 0 and ending at exactly 100. Each value is handed over
    /// before the next is computed, and the returned settlement is observable
    /// only after the 100 tick.
    async fn transfer(
        &self,
        size: u64,
        progress: mpsc::Sender<u8>,
    ) -> Result<(), TransportError>;
}
