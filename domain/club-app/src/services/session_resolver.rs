use std::sync::Arc;

use crate::{
    domain::session::{CurrentUser, Session},
    ports::role_lookup::RoleLookupPort,
};

#[async_trait::async_trait]
pub trait SessionResolverService {
    /// Attaches the stored role to a signed-in user. A failed role lookup
    /// yields a session without privileges.
    async fn resolve(&self, user: Option<CurrentUser>) -> Session;
}

pub struct SessionResolverServiceImpl<L: RoleLookupPort> {
    role_lookup: Arc<L>,
}

impl<L: RoleLookupPort> SessionResolverServiceImpl<L> {
    pub fn new(role_lookup: Arc<L>) -> Self {
        Self { role_lookup }
    }
}

#[async_trait::async_trait]
impl<L: RoleLookupPort + Send + Sync + 'static> SessionResolverService
    for SessionResolverServiceImpl<L>
{
    async fn resolve(&self, user: Option<CurrentUser>) -> Session {
        let Some(user) = user else {
            return Session::anonymous();
        };
        let auth_type = match self.role_lookup.get_auth_type(&user.email).await {
            Ok(auth_type) => auth_type,
            Err(e) => {
                log::error!("Failed to look up role of {}: {}", user.email, e);
                None
            }
        };
        Session::signed_in(user, auth_type)
    }
}
