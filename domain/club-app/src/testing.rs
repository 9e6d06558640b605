use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering as AtomicOrdering},
    },
};

use serde_json::Value;
use tokio::sync::watch;

use crate::{
    domain::{SortOrder, session::CurrentUser},
    ports::{
        document_store::{Document, DocumentData, DocumentQuery, DocumentStore, Filter, StoreError},
        identity::IdentityPort,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockOp {
    Query,
    Get,
    Fetch,
    Insert,
    Set,
    Update,
    Delete,
}

struct MockFailure {
    op: MockOp,
    path: String,
    id: Option<String>,
}

#[derive(Default)]
pub struct MockDocumentStore {
    collections: Mutex<HashMap<String, BTreeMap<String, DocumentData>>>,
    failures: Mutex<Vec<MockFailure>>,
    next_id: AtomicU64,
}

pub fn object(value: Value) -> DocumentData {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, path: &str, id: &str, value: Value) {
        self.collections
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .insert(id.to_string(), object(value));
    }

    pub fn documents(&self, path: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
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

    pub fn ids(&self, path: &str) -> Vec<String> {
        self.documents(path).into_iter().map(|d| d.id).collect()
    }

    pub fn fail(&self, op: MockOp, path: &str) {
        self.failures.lock().unwrap().push(MockFailure {
            op,
            path: path.to_string(),
            id: None,
        });
    }

    pub fn fail_for(&self, op: MockOp, path: &str, id: &str) {
        self.failures.lock().unwrap().push(MockFailure {
            op,
            path: path.to_string(),
            id: Some(id.to_string()),
        });
    }

    pub fn recover(&self) {
        self.failures.lock().unwrap().clear();
    }

    fn check(&self, op: MockOp, path: &str, id: Option<&str>) -> Result<(), StoreError> {
        let failures = self.failures.lock().unwrap();
        let failing = failures.iter().any(|f| {
            f.op == op && f.path == path && (f.id.is_none() || f.id.as_deref() == id)
        });
        if failing {
            return Err(StoreError::Unavailable(format!("{:?} {} failed", op, path)));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentStore for MockDocumentStore {
    async fn query(&self, path: &str, query: DocumentQuery) -> Result<Vec<Document>, StoreError> {
        self.check(MockOp::Query, path, None)?;
        let mut docs: Vec<Document> = self
            .documents(path)
            .into_iter()
            .filter(|doc| {
                query.filters.iter().all(|filter| match filter {
                    Filter::Equal { field, value } => doc.data.get(field) == Some(value),
                })
            })
            .collect();
        if let Some(order_by) = &query.order_by {
            docs.sort_by(|a, b| {
                let ordering = compare_values(a.data.get(&order_by.field), b.data.get(&order_by.field));
                match order_by.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        Ok(docs)
    }

    async fn get(&self, path: &str) -> Result<Vec<Document>, StoreError> {
        self.check(MockOp::Get, path, None)?;
        Ok(self.documents(path))
    }

    async fn fetch(&self, path: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.check(MockOp::Fetch, path, Some(id))?;
        Ok(self.documents(path).into_iter().find(|d| d.id == id))
    }

    async fn insert(&self, path: &str, data: DocumentData) -> Result<String, StoreError> {
        self.check(MockOp::Insert, path, None)?;
        let id = format!("doc-{}", self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1);
        self.collections
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .insert(id.clone(), data);
        Ok(id)
    }

    async fn set(&self, path: &str, id: &str, data: DocumentData) -> Result<(), StoreError> {
        self.check(MockOp::Set, path, Some(id))?;
        self.collections
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, path: &str, id: &str, patch: DocumentData) -> Result<(), StoreError> {
        self.check(MockOp::Update, path, Some(id))?;
        let mut collections = self.collections.lock().unwrap();
        let doc = collections
            .get_mut(path)
            .and_then(|docs| docs.get_mut(id))
            .ok_or(StoreError::NotFound)?;
        doc.extend(patch);
        Ok(())
    }

    async fn delete(&self, path: &str, id: &str) -> Result<(), StoreError> {
        self.check(MockOp::Delete, path, Some(id))?;
        if let Some(docs) = self.collections.lock().unwrap().get_mut(path) {
            docs.remove(id);
        }
        Ok(())
    }
}

pub struct MockIdentity {
    sender: watch::Sender<Option<CurrentUser>>,
}

impl MockIdentity {
    pub fn new(user: Option<CurrentUser>) -> Self {
        let (sender, _) = watch::channel(user);
        Self { sender }
    }

    pub fn switch(&self, user: Option<CurrentUser>) {
        self.sender.send_replace(user);
    }
}

impl IdentityPort for MockIdentity {
    fn current_user(&self) -> Option<CurrentUser> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.sender.subscribe()
    }
}
