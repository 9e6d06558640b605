use serde::Serialize;
use serde_json::Value;

use crate::{
    domain::{RepoError, RepoRetrieveError, RepoUpdateError},
    ports::document_store::{DocumentData, StoreError},
};

pub mod events;
pub mod points;
pub mod roles;

pub const UPCOMING_EVENTS_PATH: &str = "upcomingEvents/upcoming/events";
pub const PAST_EVENTS_PATH: &str = "upcomingEvents/past/events";
pub const REGULAR_POINTS_PATH: &str = "activityPoints";
pub const WRITTEN_POINTS_PATH: &str = "writtenActivityPoints";
pub const USERS_PATH: &str = "users";

impl From<StoreError> for RepoError {
    fn from(e: StoreError) -> Self {
        RepoError::StorageError(e.to_string())
    }
}

impl From<StoreError> for RepoRetrieveError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => RepoRetrieveError::NotFound,
            other => RepoRetrieveError::StorageError(other.to_string()),
        }
    }
}

impl From<StoreError> for RepoUpdateError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => RepoUpdateError::NotFound,
            other => RepoUpdateError::StorageError(other.to_string()),
        }
    }
}

fn to_document_data<T: Serialize>(value: &T) -> Result<DocumentData, String> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, got {}", other)),
        Err(e) => Err(e.to_string()),
    }
}
