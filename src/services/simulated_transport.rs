use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::mpsc;

use crate::application::services::upload_transport::{TransportError, UploadTransport};

pub const DEFAULT_FAILURE_RATE: f64 = 0.05;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

const MAX_STEP: u8 = 15;

/// Stand-in for a real network transport: advances a percentage by bounded
/// random steps on a timer, and occasionally fails at the final tick.
pub struct SimulatedTransport {
    failure_rate: f64,
    tick_interval: Duration,
}

impl SimulatedTransport {
    pub fn new(failure_rate: f64, tick_interval: Duration) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            tick_interval,
        }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATE, DEFAULT_TICK_INTERVAL)
    }
}

#[async_trait]
impl UploadTransport for SimulatedTransport {
    // Simulated time does not depend on the file size; callers only observe
    // the tick sequence.
    async fn transfer(
        &self,
        _size: u64,
        progress: mpsc::Sender<u8>,
    ) -> Result<(), TransportError> {
        let mut transferred: u8 = 0;

        while transferred < 100 {
            tokio::time::sleep(self.tick_interval).await;
            let step = rand::rng().random_range(1..=MAX_STEP);
            transferred = transferred.saturating_add(step).min(100);
            if progress.send(transferred).await.is_err() {
                // Receiver gave up on this upload.
                return Err(TransportError::Cancelled);
            }
        }

        if rand::random::<f64>() < self.failure_rate {
            return Err(TransportError::Network);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(failure_rate: f64) -> SimulatedTransport {
        SimulatedTransport::new(failure_rate, Duration::from_millis(1))
    }

    async fn run(transport: SimulatedTransport) -> (Vec<u8>, Result<(), TransportError>) {
        let (tx, mut rx) = mpsc::channel(1);
        let transfer = transport.transfer(1024, tx);
        let collector = async {
            let mut ticks = Vec::new();
            while let Some(tick) = rx.recv().await {
                ticks.push(tick);
            }
            ticks
        };
        let (settled, ticks) = tokio::join!(transfer, collector);
        (ticks, settled)
    }

    #[tokio::test]
    async fn progress_starts_above_zero_and_ends_at_one_hundred() {
        let (ticks, settled) = run(fast(0.0)).await;
        assert!(settled.is_ok());
        assert!(*ticks.first().expect("at least one tick") > 0);
        assert_eq!(*ticks.last().expect("at least one tick"), 100);
    }

    #[tokio::test]
    async fn progress_is_strictly_increasing_with_bounded_steps() {
        let (ticks, _) = run(fast(0.0)).await;
        for pair in ticks.windows(2) {
            let step = pair[1] - pair[0];
            assert!(step >= 1 && step <= MAX_STEP, "step {step} out of bounds");
        }
    }

    #[tokio::test]
    async fn certain_failure_still_delivers_the_full_sequence_first() {
        let (ticks, settled) = run(fast(1.0)).await;
        assert!(matches!(settled, Err(TransportError::Network)));
        assert_eq!(*ticks.last().expect("at least one tick"), 100);
    }

    #[tokio::test]
    async fn cancelled_when_receiver_is_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let settled = fast(0.0).transfer(1024, tx).await;
        assert!(matches!(settled, Err(TransportError::Cancelled)));
    }
}
