//! Event listener - consumes the message stream and launches trigger sequences

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::application::errors::SequenceError;
use crate::domain::entities::{ChannelRef, MessageEvent, Prediction, SequenceState, TriggerDecision};
use super::{ClassifierAdapter, ImageAcquirer, ResponseScheduler, SequenceTracker, TriggerFilter};

/// Final report of one sequence
#[derive(Debug, Clone)]
pub struct SequenceReport {
    pub id: Uuid,
    pub channel: ChannelRef,
    pub state: SequenceState,
    pub label: Option<String>,
    pub error: Option<String>,
}

impl SequenceReport {
    pub fn is_completed(&self) -> bool {
        self.state == SequenceState::Completed
    }
}

/// Root driver of the trigger pipeline.
///
/// Every matched event runs in its own task. A failing sequence never
/// reaches the listener loop.
pub struct EventListener {
    filter: TriggerFilter,
    acquirer: ImageAcquirer,
    classifier: ClassifierAdapter,
    scheduler: ResponseScheduler,
    limit: Option<Arc<Semaphore>>,
}

impl EventListener {
    pub fn new(
        filter: TriggerFilter,
        acquirer: ImageAcquirer,
        classifier: ClassifierAdapter,
        scheduler: ResponseScheduler,
    ) -> Self {
        Self {
            filter,
            acquirer,
            classifier,
            scheduler,
            limit: None,
        }
    }

    /// Cap how many sequences may be past the filter at once. Excess sequences wait
    /// for a slot inside their own task.
    pub fn with_concurrency_limit(mut self, max: usize) -> Self {
        self.limit = Some(Arc::new(Semaphore::new(max.max(1))));
        self
    }

    /// Consume events until the stream closes, then wait for sequences still in flight
    pub async fn run(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<MessageEvent>) {
        tracing::info!("Listening for spawns from {}", self.filter.target_author());
        let mut in_flight: Vec<JoinHandle<SequenceReport>> = Vec::new();

        while let Some(event) = events.recv().await {
            in_flight.retain(|h| !h.is_finished());
            if let Some(handle) = self.handle(event) {
                in_flight.push(handle);
            }
        }

        tracing::info!("Event stream closed, {} sequences in flight", in_flight.len());
        for handle in in_flight {
            if let Err(e) = handle.await {
                tracing::error!("Sequence task aborted: {}", e);
            }
        }
    }

    /// Log and filter one event, spawning a sequence if it is a trigger
    pub fn handle(self: &Arc<Self>, event: MessageEvent) -> Option<JoinHandle<SequenceReport>> {
        tracing::info!("{}: {}", event.author, event.content);

        let url = match self.filter.evaluate(&event) {
            TriggerDecision { matched: true, image_url: Some(url) } => url,
            _ => return None,
        };

        let listener = Arc::clone(self);
        let channel = event.channel;
        Some(tokio::spawn(async move { listener.run_sequence(url, channel).await }))
    }

    async fn run_sequence(&self, url: String, channel: ChannelRef) -> SequenceReport {
        let _permit = match &self.limit {
            Some(limit) => Arc::clone(limit).acquire_owned().await.ok(),
            None => None,
        };

        let mut seq = SequenceTracker::new();
        tracing::debug!("[{}] Trigger in {}: {}", seq.id(), channel, url);

        match self.execute(&url, &channel, &mut seq).await {
            Ok(prediction) => SequenceReport {
                id: seq.id(),
                channel,
                state: seq.state(),
                label: Some(prediction.label),
                error: None,
            },
            Err(e) => {
                tracing::warn!("[{}] Sequence stopped, {}", seq.id(), e);
                match e {
                    SequenceError::Acquisition(_) | SequenceError::Classification(_) => {
                        seq.advance(SequenceState::Failed);
                    }
                    SequenceError::Delivery(_) => {}
                }
                SequenceReport {
                    id: seq.id(),
                    channel,
                    state: seq.state(),
                    label: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn execute(
        &self,
        url: &str,
        channel: &ChannelRef,
        seq: &mut SequenceTracker,
    ) -> Result<Prediction, SequenceError> {
        seq.advance(SequenceState::Acquiring);
        let pixels = self.acquirer.acquire(url).await?;

        seq.advance(SequenceState::Classifying);
        let prediction = self.classifier.classify(pixels).await?;
        tracing::info!(
            "[{}] {} predicts {} ({:.3})",
            seq.id(),
            self.classifier.model_name(),
            prediction.label,
            prediction.confidence
        );

        self.scheduler
            .respond(channel, &prediction, seq)
            .await
            .map_err(SequenceError::Delivery)?;

        Ok(prediction)
    }
}
