use std::sync::Arc;

use crate::{
    domain::{
        RepoError,
        event::{Event, EventRepository, EventStatus},
        event_board::EventBoard,
    },
    workflow::events::ListEventsError,
};

#[async_trait::async_trait]
pub trait ListEventsUseCase {
    /// The session's upcoming list, loaded from the store on first use.
    async fn list_upcoming(&self) -> Result<Vec<Event>, ListEventsError>;
    async fn refresh_upcoming(&self) -> Result<Vec<Event>, ListEventsError>;
    /// Past events are only fetched on first demand, then served from the
    /// session until refreshed.
    async fn list_past(&self) -> Result<Vec<Event>, ListEventsError>;
    async fn refresh_past(&self) -> Result<Vec<Event>, ListEventsError>;
}

pub struct ListEventsUseCaseImpl<R: EventRepository> {
    event_repository: Arc<R>,
    event_board: Arc<EventBoard>,
}

impl<R: EventRepository> ListEventsUseCaseImpl<R> {
    pub fn new(event_repository: Arc<R>, event_board: Arc<EventBoard>) -> Self {
        Self {
            event_repository,
            event_board,
        }
    }
}

impl<R: EventRepository + Send + Sync + 'static> ListEventsUseCaseImpl<R> {
    async fn fetch(&self, status: EventStatus) -> Result<Vec<Event>, ListEventsError> {
        match self.event_repository.get_events(status).await {
            Ok(events) => Ok(events),
            Err(RepoError::StorageError(e)) => {
                log::error!("Error retrieving {} events: {}", status, e);
                Err(ListEventsError::StoreUnavailable(e))
            }
        }
    }
}

#[async_trait::async_trait]
impl<R: EventRepository + Send + Sync + 'static> ListEventsUseCase for ListEventsUseCaseImpl<R> {
    async fn list_upcoming(&self) -> Result<Vec<Event>, ListEventsError> {
        if let Some(events) = self.event_board.upcoming().await {
            return Ok(events);
        }
        self.refresh_upcoming().await
    }

    async fn refresh_upcoming(&self) -> Result<Vec<Event>, ListEventsError> {
        let events = self.fetch(EventStatus::Upcoming).await?;
        self.event_board.set_upcoming(events.clone()).await;
        Ok(events)
    }

    async fn list_past(&self) -> Result<Vec<Event>, ListEventsError> {
        if let Some(events) = self.event_board.past().await {
            return Ok(events);
        }
        self.refresh_past().await
    }

    async fn refresh_past(&self) -> Result<Vec<Event>, ListEventsError> {
        let events = self.fetch(EventStatus::Past).await?;
        self.event_board.set_past(events.clone()).await;
        Ok(events)
    }
}
