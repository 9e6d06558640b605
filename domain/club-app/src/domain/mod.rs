pub mod event;
pub mod event_board;
pub mod leaderboard;
pub mod milestone;
pub mod points;
pub mod role;
pub mod session;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RepoRetrieveError {
    #[error("Resource not found")]
    NotFound,
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RepoUpdateError {
    #[error("Resource not found")]
    NotFound,
    #[error("Storage error: {0}")]
    StorageError(String),
}
