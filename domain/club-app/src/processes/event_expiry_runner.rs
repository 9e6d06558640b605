use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{select, sync::Notify};
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{
        RepoError,
        event::{EventRepository, EventStatus},
    },
    workflow::events::promote::{PromoteEventWorkflow, SweepReport},
};

pub trait EventExpiryRunner {
    /// Requests a sweep soon; requests made while a sweep is running are
    /// coalesced into one follow-up sweep.
    fn schedule_sweep(&self);
}

/// Periodically promotes expired upcoming events, and additionally whenever
/// the upcoming set changes.
pub struct EventExpiryRunnerImpl<R: EventRepository, P: PromoteEventWorkflow> {
    event_repository: Arc<R>,
    promote_workflow: Arc<P>,
    interval: Duration,
    wake: Notify,
}

impl<R: EventRepository + Send + Sync + 'static, P: PromoteEventWorkflow + Send + Sync + 'static>
    EventExpiryRunnerImpl<R, P>
{
    pub fn new(event_repository: Arc<R>, promote_workflow: Arc<P>, interval: Duration) -> Self {
        Self {
            event_repository,
            promote_workflow,
            interval,
            wake: Notify::new(),
        }
    }

    pub async fn sweep_now(&self) -> Result<SweepReport, RepoError> {
        let events = self
            .event_repository
            .get_events(EventStatus::Upcoming)
            .await?;
        Ok(self.promote_workflow.sweep_expired(&events, Utc::now()).await)
    }

    pub async fn run(&self, token: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        loop {
            select! {
                _ = token.cancelled() => {
                    log::info!("Event expiry runner stopped");
                    return;
                }
                _ = interval.tick() => {}
                _ = self.wake.notified() => {}
            }

            match self.sweep_now().await {
                Ok(report) => {
                    if !report.promoted.is_empty() || !report.failed.is_empty() {
                        log::info!(
                            "Event sweep finished: {} promoted, {} failed",
                            report.promoted.len(),
                            report.failed.len()
                        );
                    }
                }
                Err(e) => log::error!("Failed to load upcoming events for sweep: {}", e),
            }
        }
    }
}

impl<R: EventRepository, P: PromoteEventWorkflow> EventExpiryRunner
    for EventExpiryRunnerImpl<R, P>
{
    fn schedule_sweep(&self) {
        self.wake.notify_one();
    }
}
