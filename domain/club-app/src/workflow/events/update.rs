use std::sync::Arc;

use crate::{
    domain::{
        EventId, RepoUpdateError,
        event::{Event, EventPatch, EventRepository},
        event_board::EventBoard,
        role::PermissionPolicy,
        session::Session,
    },
    processes::event_expiry_runner::EventExpiryRunner,
    workflow::events::EventMutationError,
};

#[async_trait::async_trait]
pub trait UpdateEventUseCase {
    async fn update_event(
        &self,
        session: &Session,
        id: &EventId,
        patch: EventPatch,
    ) -> Result<Event, EventMutationError>;
}

pub struct UpdateEventUseCaseImpl<R: EventRepository, P: PermissionPolicy, X: EventExpiryRunner> {
    event_repository: Arc<R>,
    event_board: Arc<EventBoard>,
    policy: Arc<P>,
    expiry_runner: Arc<X>,
}

impl<R: EventRepository, P: PermissionPolicy, X: EventExpiryRunner> UpdateEventUseCaseImpl<R, P, X> {
    pub fn new(
        event_repository: Arc<R>,
        event_board: Arc<EventBoard>,
        policy: Arc<P>,
        expiry_runner: Arc<X>,
    ) -> Self {
        Self {
            event_repository,
            event_board,
            policy,
            expiry_runner,
        }
    }
}

#[async_trait::async_trait]
impl<
    R: EventRepository + Send + Sync + 'static,
    P: PermissionPolicy + Send + Sync + 'static,
    X: EventExpiryRunner + Send + Sync + 'static,
> UpdateEventUseCase for UpdateEventUseCaseImpl<R, P, X>
{
    async fn update_event(
        &self,
        session: &Session,
        id: &EventId,
        patch: EventPatch,
    ) -> Result<Event, EventMutationError> {
        if !self.policy.has_permissions(session.auth_type.as_ref()) {
            log::warn!(
                "Rejected update of event {} by {:?} with role {:?}",
                id,
                session.email(),
                session.auth_type
            );
            return Err(EventMutationError::Unauthorized);
        }
        patch.validate()?;

        let updated = match self.event_repository.update_upcoming_event(id, &patch).await {
            Ok(updated) => updated,
            Err(RepoUpdateError::NotFound) => {
                // Usually a sweep moved it to past events in the meantime.
                log::warn!("Dropping update of event {}: no longer upcoming", id);
                self.event_board.remove_upcoming(id).await;
                return Err(EventMutationError::NotFound);
            }
            Err(RepoUpdateError::StorageError(e)) => {
                log::error!("Failed to update event {}: {}", id, e);
                return Err(EventMutationError::StoreUnavailable(e));
            }
        };

        log::info!("Event {} updated", id);
        self.event_board.replace_upcoming(updated.clone()).await;
        self.expiry_runner.schedule_sweep();
        Ok(updated)
    }
}
