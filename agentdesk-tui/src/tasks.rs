//! Background tasks that feed completion signals into the event loop.
//!
//! Both timers stand in for backend work that does not exist yet. They only
//! post an event; the core reacts to the event, not to the timer.

use crate::events::TuiEvent;
use agentdesk_core::ProbeOutcome;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Post `DocumentsProcessed` for `batch` once `delay` has elapsed.
pub fn spawn_processing_timer(
    sender: mpsc::Sender<TuiEvent>,
    batch: Vec<String>,
    delay: Duration,
) -> JoinHandle<()> {
    let deadline = Instant::now() + delay;
    tokio::spawn(async move {
        sleep_until(deadline).await;
        tracing::debug!(count = batch.len(), "Document batch processed");
        let _ = sender.send(TuiEvent::DocumentsProcessed { batch }).await;
    })
}

/// Post `ProbeFinished` for `endpoint_id` once `delay` has elapsed. The
/// probe makes no network call and always reports the endpoint reachable.
pub fn spawn_endpoint_probe(
    sender: mpsc::Sender<TuiEvent>,
    endpoint_id: String,
    delay: Duration,
) -> JoinHandle<()> {
    let deadline = Instant::now() + delay;
    tokio::spawn(async move {
        sleep_until(deadline).await;
        let _ = sender
            .send(TuiEvent::ProbeFinished {
                endpoint_id,
                outcome: ProbeOutcome::Reachable,
            })
            .await;
    })
}
