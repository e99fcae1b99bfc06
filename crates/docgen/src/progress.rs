use crate::view::ProgressSink;
use docgen_core::progress::{CosmeticProgress, MAX_INCREMENT};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Drives the cosmetic progress bar on its own task.
///
/// The ticker knows nothing about the request it decorates. It is stopped
/// explicitly once the request settles, and aborted if dropped.
pub struct ProgressTicker {
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub fn start(period: Duration, sink: Arc<dyn ProgressSink>) -> Self {
        let handle = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut progress = CosmeticProgress::default();
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;
                progress = progress.advance(rng.gen_range(0.0..MAX_INCREMENT));
                sink.set_progress(progress.displayed());
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Stop ticking. No further values reach the sink once this returns.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
