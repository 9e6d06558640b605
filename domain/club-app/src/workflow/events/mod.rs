use crate::domain::{RepoError, event::InvalidEventError};

pub mod create;
pub mod delete;
pub mod list;
pub mod promote;
pub mod update;

#[derive(Debug, thiserror::Error)]
pub enum EventMutationError {
    #[error("not allowed to modify events")]
    Unauthorized,
    #[error("event not found among upcoming events")]
    NotFound,
    #[error("invalid event: {0}")]
    InvalidEvent(#[from] InvalidEventError),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<RepoError> for EventMutationError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::StorageError(e) => EventMutationError::StoreUnavailable(e),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListEventsError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}
