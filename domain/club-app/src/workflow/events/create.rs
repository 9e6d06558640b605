use std::sync::Arc;

use crate::{
    domain::{
        event::{Event, EventDraft, EventRepository},
        event_board::EventBoard,
        role::PermissionPolicy,
        session::Session,
    },
    processes::event_expiry_runner::EventExpiryRunner,
    workflow::events::EventMutationError,
};

#[async_trait::async_trait]
pub trait CreateEventUseCase {
    async fn create_event(
        &self,
        session: &Session,
        draft: EventDraft,
    ) -> Result<Event, EventMutationError>;
}

pub struct CreateEventUseCaseImpl<R: EventRepository, P: PermissionPolicy, X: EventExpiryRunner> {
    event_repository: Arc<R>,
    event_board: Arc<EventBoard>,
    policy: Arc<P>,
    expiry_runner: Arc<X>,
}

impl<R: EventRepository, P: PermissionPolicy, X: EventExpiryRunner> CreateEventUseCaseImpl<R, P, X> {
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
> CreateEventUseCase for CreateEventUseCaseImpl<R, P, X>
{
    async fn create_event(
        &self,
        session: &Session,
        draft: EventDraft,
    ) -> Result<Event, EventMutationError> {
        if !self.policy.has_permissions(session.auth_type.as_ref()) {
            log::warn!(
                "Rejected event creation by {:?} with role {:?}",
                session.email(),
                session.auth_type
            );
            return Err(EventMutationError::Unauthorized);
        }
        draft.validate()?;

        let event = self
            .event_repository
            .create_upcoming_event(&draft)
            .await
            .inspect_err(|e| log::error!("Failed to create event '{}': {}", draft.title, e))?;

        log::info!("Event {} ({}) created", event.id, event.title);
        // Shown first until the next refresh re-sorts the list.
        self.event_board.prepend_upcoming(event.clone()).await;
        self.expiry_runner.schedule_sweep();
        Ok(event)
    }
}
