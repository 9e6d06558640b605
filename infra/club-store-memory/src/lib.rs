use std::{cmp::Ordering, collections::BTreeMap, path::Path};

use club_app::{
    domain::SortOrder,
    ports::document_store::{
        Document, DocumentData, DocumentQuery, DocumentStore, Filter, StoreError,
    },
};
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed seed file: {0}")]
    Json(#[from] serde_json::Error),
}

type Collection = BTreeMap<String, DocumentData>;

/// Process-local document store. Documents of a collection are kept ordered
/// by id, which is also the order unordered queries return them in.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, Collection>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed files map collection paths to objects of `id -> document`:
    ///
    /// ```json
    /// { "users": { "u1": { "email": "pres@club.org", "authType": "officer" } } }
    /// ```
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_seed_json(&content)
    }

    pub fn from_seed_json(content: &str) -> Result<Self, SeedError> {
        let seed: BTreeMap<String, Collection> = serde_json::from_str(content)?;
        let store = Self::new();
        for (path, documents) in seed {
            log::debug!("Seeded {} documents into {}", documents.len(), path);
            store.collections.insert(path, documents);
        }
        Ok(store)
    }

    fn snapshot(&self, path: &str) -> Vec<Document> {
        self.collections
            .get(path)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn matches(doc: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::Equal { field, value } => doc.data.get(field) == Some(value),
    }
}

/// Missing fields sort first; values of different kinds compare equal.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => Ordering::Equal,
        },
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, path: &str, query: DocumentQuery) -> Result<Vec<Document>, StoreError> {
        let mut docs: Vec<Document> = self
            .snapshot(path)
            .into_iter()
            .filter(|doc| query.filters.iter().all(|filter| matches(doc, filter)))
            .collect();
        if let Some(order_by) = &query.order_by {
            docs.sort_by(|a, b| {
                let ordering =
                    compare_field(a.data.get(&order_by.field), b.data.get(&order_by.field));
                match order_by.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        Ok(docs)
    }

    async fn get(&self, path: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.snapshot(path))
    }

    async fn fetch(&self, path: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.collections.get(path).and_then(|docs| {
            docs.get(id).map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            })
        }))
    }

    async fn insert(&self, path: &str, data: DocumentData) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .entry(path.to_string())
            .or_default()
            .insert(id.clone(), data);
        Ok(id)
    }

    async fn set(&self, path: &str, id: &str, data: DocumentData) -> Result<(), StoreError> {
        self.collections
            .entry(path.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, path: &str, id: &str, patch: DocumentData) -> Result<(), StoreError> {
        let mut docs = self.collections.get_mut(path).ok_or(StoreError::NotFound)?;
        let doc = docs.get_mut(id).ok_or(StoreError::NotFound)?;
        doc.extend(patch);
        Ok(())
    }

    async fn delete(&self, path: &str, id: &str) -> Result<(), StoreError> {
        if let Some(mut docs) = self.collections.get_mut(path) {
            docs.remove(id);
        }
        Ok(())
    }
}
