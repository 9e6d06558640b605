use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    EventId, RepoError, RepoRetrieveError,
    event::{Event, EventRepository},
    event_board::EventBoard,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromotionError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<RepoError> for PromotionError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::StorageError(e) => PromotionError::StoreUnavailable(e),
        }
    }
}

#[derive(Debug, Default)]
pub struct SweepReport {
    pub promoted: Vec<EventId>,
    pub failed: Vec<(EventId, PromotionError)>,
}

#[async_trait::async_trait]
pub trait PromoteEventWorkflow {
    /// Moves `event` from upcoming to past once a full day has passed since
    /// its date. Returns whether this call performed the move.
    async fn promote_if_expired(
        &self,
        event: &Event,
        now: DateTime<Utc>,
    ) -> Result<bool, PromotionError>;
    /// A failure for one event never prevents the others from being promoted.
    async fn sweep_expired(&self, events: &[Event], now: DateTime<Utc>) -> SweepReport;
}

pub struct PromoteEventWorkflowImpl<R: EventRepository> {
    event_repository: Arc<R>,
    event_board: Arc<EventBoard>,
}

impl<R: EventRepository> PromoteEventWorkflowImpl<R> {
    pub fn new(event_repository: Arc<R>, event_board: Arc<EventBoard>) -> Self {
        Self {
            event_repository,
            event_board,
        }
    }
}

#[async_trait::async_trait]
impl<R: EventRepository + Send + Sync + 'static> PromoteEventWorkflow
    for PromoteEventWorkflowImpl<R>
{
    async fn promote_if_expired(
        &self,
        event: &Event,
        now: DateTime<Utc>,
    ) -> Result<bool, PromotionError> {
        if !event.is_expired(now) {
            return Ok(false);
        }

        // Promote what is stored now, not the caller's possibly stale copy.
        let current = match self.event_repository.get_upcoming_event(&event.id).await {
            Ok(current) => current,
            Err(RepoRetrieveError::NotFound) => {
                log::debug!("Event {} is no longer upcoming, nothing to promote", event.id);
                self.event_board.remove_upcoming(&event.id).await;
                return Ok(false);
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                return Err(PromotionError::StoreUnavailable(e));
            }
        };
        if !current.is_expired(now) {
            return Ok(false);
        }

        // The past record is keyed by id, so a retry after a failed delete
        // overwrites instead of duplicating.
        self.event_repository.put_past_event(&current).await?;
        self.event_repository
            .remove_upcoming_event(&current.id)
            .await?;

        self.event_board.record_promoted(&current).await;
        log::info!("Event {} ({}) moved to past events", current.id, current.title);
        Ok(true)
    }

    async fn sweep_expired(&self, events: &[Event], now: DateTime<Utc>) -> SweepReport {
        let outcomes = futures::future::join_all(events.iter().map(|event| async move {
            (event.id.clone(), self.promote_if_expired(event, now).await)
        }))
        .await;

        let mut report = SweepReport::default();
        for (event_id, outcome) in outcomes {
            match outcome {
                Ok(true) => report.promoted.push(event_id),
                Ok(false) => {}
                Err(e) => {
                    log::error!("Failed to promote event {}: {}", event_id, e);
                    report.failed.push((event_id, e));
                }
            }
        }
        report
    }
}
