//! Atomic publication of generated timelines.
//!
//! Timelines are built off the reader's path and swapped in whole. Readers
//! clone an `Arc` and never observe a partially built hierarchy. Each
//! generation takes a ticket; a result is published only if no newer
//! generation was started in the meantime, so a slow stale build can never
//! overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::error::DashaError;
use crate::timeline::{Timeline, TimelineRequest};

/// Holder of the currently published timeline.
#[derive(Debug, Default)]
pub struct TimelineStore {
    current: RwLock<Option<Arc<Timeline>>>,
    latest_ticket: AtomicU64,
}

impl TimelineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The published timeline, if any.
    pub fn current(&self) -> Option<Arc<Timeline>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the published timeline unconditionally and invalidate any
    /// generation still in flight.
    pub fn publish(&self, timeline: Timeline) -> Arc<Timeline> {
        let timeline = Arc::new(timeline);
        self.replace(Some(Arc::clone(&timeline)));
        timeline
    }

    /// Drop the published timeline, e.g. when the birth chart is removed.
    pub fn clear(&self) {
        self.replace(None);
    }

    /// Generate on the calling thread and publish.
    ///
    /// If another generation started meanwhile, the result is returned
    /// without being published.
    pub fn generate_now(&self, request: &TimelineRequest) -> Result<Arc<Timeline>, DashaError> {
        let ticket = self.next_ticket();
        let timeline = request.generate()?;
        Ok(self
            .publish_if_latest(ticket, timeline)
            .unwrap_or_else(|stale| Arc::new(stale)))
    }

    /// Generate on a background thread.
    ///
    /// The handle yields `Ok(Some(_))` when the result was published and
    /// `Ok(None)` when a newer generation superseded it. On error the
    /// previously published timeline stays in place.
    pub fn regenerate(
        self: &Arc<Self>,
        request: TimelineRequest,
    ) -> JoinHandle<Result<Option<Arc<Timeline>>, DashaError>> {
        let ticket = self.next_ticket();
        let store = Arc::clone(self);
        thread::spawn(move || {
            let timeline = request.generate().inspect_err(|e| {
                warn!(ticket, error = %e, "timeline generation failed");
            })?;
            Ok(store.publish_if_latest(ticket, timeline).ok())
        })
    }

    /// Start a new generation and return its ticket.
    pub fn next_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Publish `timeline` if `ticket` is still the most recent generation.
    ///
    /// A superseded timeline is handed back unpublished.
    pub fn publish_if_latest(
        &self,
        ticket: u64,
        timeline: Timeline,
    ) -> Result<Arc<Timeline>, Timeline> {
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let latest = self.latest_ticket.load(Ordering::Acquire);
        if ticket != latest {
            info!(ticket, latest, "discarding superseded timeline");
            return Err(timeline);
        }
        let timeline = Arc::new(timeline);
        *slot = Some(Arc::clone(&timeline));
        info!(
            ticket,
            mahadashas = timeline.mahadashas().len(),
            "published timeline"
        );
        Ok(timeline)
    }

    /// Bump the ticket and store `next` under one write guard, so no
    /// generation can publish between the two.
    fn replace(&self, next: Option<Arc<Timeline>>) {
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        self.latest_ticket.fetch_add(1, Ordering::AcqRel);
        *slot = next;
    }
}
