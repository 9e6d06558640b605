use std::sync::Arc;

use crate::{
    domain::{
        EventId, event::EventRepository, event_board::EventBoard, role::PermissionPolicy,
        session::Session,
    },
    processes::event_expiry_runner::EventExpiryRunner,
    workflow::events::EventMutationError,
};

#[async_trait::async_trait]
pub trait DeleteEventUseCase {
    /// Only upcoming events can be deleted. Deleting an id that is already
    /// gone succeeds.
    async fn delete_event(&self, session: &Session, id: &EventId) -> Result<(), EventMutationError>;
}

pub struct DeleteEventUseCaseImpl<R: EventRepository, P: PermissionPolicy, X: EventExpiryRunner> {
    event_repository: Arc<R>,
    event_board: Arc<EventBoard>,
    policy: Arc<P>,
    expiry_runner: Arc<X>,
}

impl<R: EventRepository, P: PermissionPolicy, X: EventExpiryRunner> DeleteEventUseCaseImpl<R, P, X> {
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
> DeleteEventUseCase for DeleteEventUseCaseImpl<R, P, X>
{
    async fn delete_event(&self, session: &Session, id: &EventId) -> Result<(), EventMutationError> {
        if !self.policy.has_permissions(session.auth_type.as_ref()) {
            log::warn!(
                "Rejected deletion of event {} by {:?} with role {:?}",
                id,
                session.email(),
                session.auth_type
            );
            return Err(EventMutationError::Unauthorized);
        }

        self.event_repository
            .remove_upcoming_event(id)
            .await
            .inspect_err(|e| log::error!("Failed to delete event {}: {}", id, e))?;

        log::info!("Event {} deleted", id);
        self.event_board.remove_upcoming(id).await;
        self.expiry_runner.schedule_sweep();
        Ok(())
    }
}
