use std::sync::Arc;

use serde_json::Value;

use crate::{
    domain::{RepoError, role::AuthType},
    persistence::USERS_PATH,
    ports::{
        document_store::{DocumentQuery, DocumentStore},
        role_lookup::RoleLookupPort,
    },
};

pub struct StoreRoleLookup<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> StoreRoleLookup<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: DocumentStore + Send + Sync + 'static> RoleLookupPort for StoreRoleLookup<S> {
    async fn get_auth_type(&self, email: &str) -> Result<Option<AuthType>, RepoError> {
        let docs = self
            .store
            .query(USERS_PATH, DocumentQuery::new().where_equal("email", email))
            .await?;
        let auth_type = docs
            .into_iter()
            .next()
            .and_then(|doc| match doc.data.get("authType") {
                Some(Value::String(role)) => Some(AuthType::new(role.as_str())),
                _ => None,
            });
        Ok(auth_type)
    }
}
