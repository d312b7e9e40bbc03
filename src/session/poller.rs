use crate::api::DocumentBackend;
use crate::types::DocumentId;
use std::time::Duration;

/// Polls `GET /status/{id}/` on a fixed `every` schedule until the backend
/// reports completion, returning the final chunk count.
///
/// The first request goes out one interval after the call. Ticks are counted
/// from the start, not from the previous response, and only one request is
/// in flight at a time; a response slower than the interval delays the next
/// tick instead of stacking requests. Failed checks are logged and the loop
/// keeps its schedule; there is no retry limit. Dropping the future stops the
/// loop, so the owning task decides its lifetime.
pub async fn poll_until_complete<B, F>(
    backend: &B,
    id: &DocumentId,
    every: Duration,
    mut on_progress: F,
) -> u32
where
    B: DocumentBackend + ?Sized,
    F: FnMut(u32),
{
    let mut ticks = Ticker::new(every);
    loop {
        ticks.tick().await;
        match backend.status(id).await {
            Ok(status) if status.is_completed() => {
                tracing::debug!(document_id = %id, chunks = status.chunks_processed, "ingestion completed");
                return status.chunks_processed;
            }
            Ok(status) => on_progress(status.chunks_processed),
            Err(err) => tracing::warn!(document_id = %id, "status check failed: {err}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
struct Ticker(tokio::time::Interval);

#[cfg(not(target_arch = "wasm32"))]
impl Ticker {
    fn new(every: Duration) -> Self {
        // `interval_at` skips the immediate first tick `interval` would fire.
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        Self(interval)
    }

    async fn tick(&mut self) {
        self.0.tick().await;
    }
}

#[cfg(target_arch = "wasm32")]
struct Ticker(gloo_timers::future::IntervalStream);

#[cfg(target_arch = "wasm32")]
impl Ticker {
    fn new(every: Duration) -> Self {
        let millis = u32::try_from(every.as_millis()).unwrap_or(u32::MAX);
        Self(gloo_timers::future::IntervalStream::new(millis))
    }

    async fn tick(&mut self) {
        use futures::StreamExt;
        self.0.next().await;
    }
}
