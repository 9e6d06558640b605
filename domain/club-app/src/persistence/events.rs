use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{
        EventId, RepoError, RepoRetrieveError, RepoUpdateError, SortOrder,
        event::{Event, EventDraft, EventPatch, EventRepository, EventStatus, sort_by_date},
    },
    persistence::{PAST_EVENTS_PATH, UPCOMING_EVENTS_PATH, to_document_data},
    ports::document_store::{Document, DocumentData, DocumentQuery, DocumentStore},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize, Deserialize)]
struct EventDocument {
    title: String,
    date: String,
    #[serde(default)]
    description: String,
}

impl EventDocument {
    fn from_parts(title: &str, date: NaiveDate, description: &str) -> Self {
        Self {
            title: title.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            description: description.to_string(),
        }
    }
}

fn event_from_document(doc: Document) -> Result<Event, String> {
    let record: EventDocument = serde_json::from_value(Value::Object(doc.data))
        .map_err(|e| format!("malformed event {}: {}", doc.id, e))?;
    let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT)
        .map_err(|e| format!("event {} has invalid date '{}': {}", doc.id, record.date, e))?;
    Ok(Event {
        id: EventId(doc.id),
        title: record.title,
        date,
        description: record.description,
    })
}

fn patch_to_document(patch: &EventPatch) -> DocumentData {
    let mut data = DocumentData::new();
    if let Some(title) = &patch.title {
        data.insert("title".to_string(), Value::from(title.as_str()));
    }
    if let Some(date) = patch.date {
        data.insert(
            "date".to_string(),
            Value::from(date.format(DATE_FORMAT).to_string()),
        );
    }
    if let Some(description) = &patch.description {
        data.insert("description".to_string(), Value::from(description.as_str()));
    }
    data
}

fn collection_path(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Upcoming => UPCOMING_EVENTS_PATH,
        EventStatus::Past => PAST_EVENTS_PATH,
    }
}

pub struct StoreEventRepository<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> StoreEventRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: DocumentStore + Send + Sync + 'static> EventRepository for StoreEventRepository<S> {
    async fn get_events(&self, status: EventStatus) -> Result<Vec<Event>, RepoError> {
        let docs = self
            .store
            .query(
                collection_path(status),
                DocumentQuery::new().order_by("date", SortOrder::Ascending),
            )
            .await?;

        let mut events = Vec::with_capacity(docs.len());
        for doc in docs {
            match event_from_document(doc) {
                Ok(event) => events.push(event),
                Err(e) => log::warn!("Skipping {} event: {}", status, e),
            }
        }
        sort_by_date(&mut events);
        Ok(events)
    }

    async fn get_upcoming_event(&self, id: &EventId) -> Result<Event, RepoRetrieveError> {
        let doc = self
            .store
            .fetch(UPCOMING_EVENTS_PATH, id.as_str())
            .await?
            .ok_or(RepoRetrieveError::NotFound)?;
        event_from_document(doc).map_err(RepoRetrieveError::StorageError)
    }

    async fn create_upcoming_event(&self, draft: &EventDraft) -> Result<Event, RepoError> {
        let record = EventDocument::from_parts(&draft.title, draft.date, &draft.description);
        let data = to_document_data(&record).map_err(RepoError::StorageError)?;
        let id = self.store.insert(UPCOMING_EVENTS_PATH, data).await?;
        Ok(draft.clone().into_event(EventId(id)))
    }

    async fn update_upcoming_event(
        &self,
        id: &EventId,
        patch: &EventPatch,
    ) -> Result<Event, RepoUpdateError> {
        self.store
            .update(UPCOMING_EVENTS_PATH, id.as_str(), patch_to_document(patch))
            .await?;
        let doc = self
            .store
            .fetch(UPCOMING_EVENTS_PATH, id.as_str())
            .await?
            .ok_or(RepoUpdateError::NotFound)?;
        event_from_document(doc).map_err(RepoUpdateError::StorageError)
    }

    async fn remove_upcoming_event(&self, id: &EventId) -> Result<(), RepoError> {
        self.store.delete(UPCOMING_EVENTS_PATH, id.as_str()).await?;
        Ok(())
    }

    async fn put_past_event(&self, event: &Event) -> Result<(), RepoError> {
        let record = EventDocument::from_parts(&event.title, event.date, &event.description);
        let data = to_document_data(&record).map_err(RepoError::StorageError)?;
        self.store
            .set(PAST_EVENTS_PATH, event.id.as_str(), data)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{MockDocumentStore, MockOp};

    fn repository() -> (Arc<MockDocumentStore>, StoreEventRepository<MockDocumentStore>) {
        let store = Arc::new(MockDocumentStore::new());
        (store.clone(), StoreEventRepository::new(store))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn test_get_events_sorted_and_skips_malformed() {
        let (store, repo) = repository();
        store.seed(
            UPCOMING_EVENTS_PATH,
            "b",
            json!({"title": "States", "date": "2024-04-12", "description": "Sacramento"}),
        );
        store.seed(
            UPCOMING_EVENTS_PATH,
            "a",
            json!({"title": "Bay Section", "date": "2024-02-03"}),
        );
        store.seed(
            UPCOMING_EVENTS_PATH,
            "c",
            json!({"title": "Broken", "date": "someday"}),
        );

        let events = repo.get_events(EventStatus::Upcoming).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, EventId::new("a"));
        assert_eq!(events[0].description, "");
        assert_eq!(events[1].date, date("2024-04-12"));
        assert!(repo.get_events(EventStatus::Past).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_events_propagates_store_failure() {
        let (store, repo) = repository();
        store.fail(MockOp::Query, UPCOMING_EVENTS_PATH);
        assert!(matches!(
            repo.get_events(EventStatus::Upcoming).await,
            Err(RepoError::StorageError(_))
        ));
    }

    #[tokio::test]
    async fn test_create_then_update() {
        let (store, repo) = repository();
        let draft = EventDraft::new("Nationals", date("2024-06-29"), "");

        let created = repo.create_upcoming_event(&draft).await.unwrap();
        assert_eq!(store.ids(UPCOMING_EVENTS_PATH), vec![created.id.0.clone()]);

        let patch = EventPatch {
            description: Some("Orlando".to_string()),
            ..Default::default()
        };
        let updated = repo
            .update_upcoming_event(&created.id, &patch)
            .await
            .unwrap();
        assert_eq!(updated.title, "Nationals");
        assert_eq!(updated.description, "Orlando");
        assert_eq!(
            repo.get_upcoming_event(&created.id).await.unwrap(),
            updated
        );
    }

    #[tokio::test]
    async fn test_update_missing_event_is_not_found() {
        let (_, repo) = repository();
        let result = repo
            .update_upcoming_event(&EventId::new("gone"), &EventPatch::default())
            .await;
        assert!(matches!(result, Err(RepoUpdateError::NotFound)));
    }

    #[tokio::test]
    async fn test_put_past_event_is_keyed_by_id() {
        let (store, repo) = repository();
        let event = EventDraft::new("Leadership Camp", date("2024-01-20"), "")
            .into_event(EventId::new("evt-1"));

        repo.put_past_event(&event).await.unwrap();
        repo.put_past_event(&event).await.unwrap();

        assert_eq!(store.ids(PAST_EVENTS_PATH), vec!["evt-1".to_string()]);
        let past = repo.get_events(EventStatus::Past).await.unwrap();
        assert_eq!(past, vec![event]);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (store, repo) = repository();
        store.seed(
            UPCOMING_EVENTS_PATH,
            "a",
            json!({"title": "Bay Section", "date": "2024-02-03"}),
        );
        repo.remove_upcoming_event(&EventId::new("a")).await.unwrap();
        repo.remove_upcoming_event(&EventId::new("a")).await.unwrap();
        assert!(store.ids(UPCOMING_EVENTS_PATH).is_empty());
    }
}
