use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{
        RepoError, SortOrder,
        points::{PointTrack, PointsRepository, UserPoints},
    },
    persistence::{REGULAR_POINTS_PATH, WRITTEN_POINTS_PATH},
    ports::document_store::{Document, DocumentQuery, DocumentStore},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsDocument {
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    activity_points: u64,
}

fn points_from_document(doc: Document) -> Result<UserPoints, String> {
    let record: PointsDocument = serde_json::from_value(Value::Object(doc.data))
        .map_err(|e| format!("malformed points record {}: {}", doc.id, e))?;
    Ok(UserPoints {
        email: record.email,
        name: record.name,
        activity_points: record.activity_points,
    })
}

fn collection_path(track: PointTrack) -> &'static str {
    match track {
        PointTrack::Regular => REGULAR_POINTS_PATH,
        PointTrack::Written => WRITTEN_POINTS_PATH,
    }
}

pub struct StorePointsRepository<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> StorePointsRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: DocumentStore + Send + Sync + 'static> PointsRepository for StorePointsRepository<S> {
    async fn get_track(&self, track: PointTrack) -> Result<Vec<UserPoints>, RepoError> {
        let docs = self
            .store
            .query(
                collection_path(track),
                DocumentQuery::new().order_by("activityPoints", SortOrder::Descending),
            )
            .await?;
        Ok(docs
            .into_iter()
            .filter_map(|doc| match points_from_document(doc) {
                Ok(points) => Some(points),
                Err(e) => {
                    log::warn!("Skipping {} track entry: {}", track, e);
                    None
                }
            })
            .collect())
    }

    async fn get_user_points(
        &self,
        track: PointTrack,
        email: &str,
    ) -> Result<Option<UserPoints>, RepoError> {
        let docs = self
            .store
            .query(
                collection_path(track),
                DocumentQuery::new().where_equal("email", email),
            )
            .await?;
        match docs.into_iter().next() {
            Some(doc) => points_from_document(doc)
                .map(Some)
                .map_err(RepoError::StorageError),
            None => Ok(None),
        }
    }
}
