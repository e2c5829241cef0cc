//! Business event verification.
//!
//! The platform publishes a business event for every state change. A
//! consumer records them into an [`EventSource`]; steps then wait for the
//! event they expect with [`EventAssertion`].

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::EventConfig;
use crate::error::{Result, StepError};

/// A business event type the platform emits.
pub trait BusinessEvent {
    /// Event type name as published.
    const TYPE: &'static str;
}

/// Raised when a loan is re-aged.
#[derive(Debug, Clone, Copy)]
pub struct LoanReAgeEvent;

impl BusinessEvent for LoanReAgeEvent {
    const TYPE: &'static str = "LoanReAgeBusinessEvent";
}

/// Raised when a re-age is reversed.
#[derive(Debug, Clone, Copy)]
pub struct LoanUndoReAgeEvent;

impl BusinessEvent for LoanUndoReAgeEvent {
    const TYPE: &'static str = "LoanUndoReAgeBusinessEvent";
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedEvent {
    pub event_type: String,
    /// Loan id for loan events.
    pub aggregate_id: i64,
    pub received_at: DateTime<Utc>,
    pub payload: Value,
}

impl ReceivedEvent {
    pub fn new(event_type: impl Into<String>, aggregate_id: i64, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            aggregate_id,
            received_at: Utc::now(),
            payload,
        }
    }

    pub fn is<E: BusinessEvent>(&self, aggregate_id: i64) -> bool {
        self.event_type == E::TYPE && self.aggregate_id == aggregate_id
    }
}

/// Where received events can be looked up.
pub trait EventSource: Send + Sync {
    /// First recorded event of `event_type` for `aggregate_id`.
    fn find(&self, event_type: &str, aggregate_id: i64) -> Option<ReceivedEvent>;
}

/// In-memory event store filled by a consumer task.
#[derive(Debug, Default)]
pub struct EventLog {
    events: RwLock<Vec<ReceivedEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: ReceivedEvent) {
        debug!(
            event_type = %event.event_type,
            aggregate_id = event.aggregate_id,
            "Recorded business event"
        );
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub fn len(&self) -> usize {
        self.events.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventSource for EventLog {
    fn find(&self, event_type: &str, aggregate_id: i64) -> Option<ReceivedEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.event_type == event_type && e.aggregate_id == aggregate_id)
            .cloned()
    }
}

/// Waits for expected events to show up in an [`EventSource`].
#[derive(Clone)]
pub struct EventAssertion {
    source: Arc<dyn EventSource>,
    enabled: bool,
    wait: Duration,
    poll: Duration,
}

impl EventAssertion {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self::from_config(&EventConfig::default(), source)
    }

    pub fn from_config(config: &EventConfig, source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            enabled: config.enabled,
            wait: config.wait(),
            poll: config.poll_interval(),
        }
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_poll_interval(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wait until an `E` event for `aggregate_id` has been received.
    ///
    /// Returns `Ok(None)` without looking when verification is disabled.
    pub async fn assert_event_raised<E: BusinessEvent>(
        &self,
        aggregate_id: i64,
    ) -> Result<Option<ReceivedEvent>> {
        if !self.enabled {
            info!(
                event_type = E::TYPE,
                aggregate_id, "Event verification disabled, skipping"
            );
            return Ok(None);
        }

        let deadline = tokio::time::Instant::now() + self.wait;
        loop {
            if let Some(event) = self.source.find(E::TYPE, aggregate_id) {
                debug!(event_type = E::TYPE, aggregate_id, "Event raised");
                return Ok(Some(event));
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                warn!(
                    event_type = E::TYPE,
                    aggregate_id,
                    wait_ms = self.wait.as_millis() as u64,
                    "Event not raised in time"
                );
                return Err(StepError::EventNotRaised {
                    event: E::TYPE,
                    aggregate_id,
                });
            }
            tokio::time::sleep(self.poll.min(deadline - now)).await;
        }
    }
}

impl std::fmt::Debug for EventAssertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventAssertion")
            .field("enabled", &self.enabled)
            .field("wait", &self.wait)
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}
