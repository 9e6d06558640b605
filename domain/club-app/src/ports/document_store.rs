use serde_json::Value;

use crate::domain::SortOrder;

pub type DocumentData = serde_json::Map<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: DocumentData,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Equal { field: String, value: Value },
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentQuery {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_equal(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Equal {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            order,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Client of the hosted document database. Collection paths are
/// slash-separated, e.g. `upcomingEvents/upcoming/events`.
#[async_trait::async_trait]
pub trait DocumentStore {
    async fn query(&self, path: &str, query: DocumentQuery) -> Result<Vec<Document>, StoreError>;
    async fn get(&self, path: &str) -> Result<Vec<Document>, StoreError>;
    async fn fetch(&self, path: &str, id: &str) -> Result<Option<Document>, StoreError>;
    async fn insert(&self, path: &str, data: DocumentData) -> Result<String, StoreError>;
    /// Create or overwrite the document with the given id.
    async fn set(&self, path: &str, id: &str, data: DocumentData) -> Result<(), StoreError>;
    /// Merge `patch` into an existing document; `NotFound` when it does not exist.
    async fn update(&self, path: &str, id: &str, patch: DocumentData) -> Result<(), StoreError>;
    /// Deleting a missing document succeeds.
    async fn delete(&self, path: &str, id: &str) -> Result<(), StoreError>;
}
