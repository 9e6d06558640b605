use std::sync::Arc;

use tokio::{select, sync::watch};
use tokio_util::sync::CancellationToken;

use crate::{
    domain::session::Session, ports::identity::IdentityPort,
    services::session_resolver::SessionResolverService,
};

pub trait SessionWatcher {
    fn current_session(&self) -> Session;
    fn subscribe(&self) -> watch::Receiver<Session>;
}

/// Keeps the resolved session in step with sign-in and sign-out transitions
/// of the identity provider.
pub struct SessionWatcherImpl<I: IdentityPort, S: SessionResolverService> {
    identity: Arc<I>,
    resolver: Arc<S>,
    session: watch::Sender<Session>,
}

impl<I: IdentityPort + Send + Sync + 'static, S: SessionResolverService + Send + Sync + 'static>
    SessionWatcherImpl<I, S>
{
    pub fn new(identity: Arc<I>, resolver: Arc<S>) -> Self {
        let (session, _) = watch::channel(Session::anonymous());
        Self {
            identity,
            resolver,
            session,
        }
    }

    fn apply(&self, session: Session) {
        match session.email() {
            Some(email) => log::info!("Signed in as {} with role {:?}", email, session.auth_type),
            None => log::info!("No user signed in"),
        }
        self.session.send_replace(session);
    }

    pub async fn run(&self, token: CancellationToken) {
        let mut identity = self.identity.subscribe();
        let user = identity.borrow_and_update().clone();
        self.apply(self.resolver.resolve(user).await);

        loop {
            select! {
                _ = token.cancelled() => break,
                changed = identity.changed() => {
                    if changed.is_err() {
                        log::warn!("Identity provider went away");
                        break;
                    }
                    let user = identity.borrow_and_update().clone();
                    self.apply(self.resolver.resolve(user).await);
                }
            }
        }
        log::info!("Session watcher stopped");
    }
}

impl<I: IdentityPort, S: SessionResolverService> SessionWatcher for SessionWatcherImpl<I, S> {
    fn current_session(&self) -> Session {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }
}
