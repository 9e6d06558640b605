use crate::domain::{RepoError, role::AuthType};

#[async_trait::async_trait]
pub trait RoleLookupPort {
    async fn get_auth_type(&self, email: &str) -> Result<Option<AuthType>, RepoError>;
}
