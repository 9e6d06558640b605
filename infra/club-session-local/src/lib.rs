use club_app::{domain::session::CurrentUser, ports::identity::IdentityPort};
use tokio::sync::watch;

/// Identity provider for a single local user, driven by explicit sign-in and
/// sign-out calls.
pub struct LocalIdentityProvider {
    user: watch::Sender<Option<CurrentUser>>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        let (user, _) = watch::channel(None);
        Self { user }
    }

    pub fn signed_in(user: CurrentUser) -> Self {
        let provider = Self::new();
        provider.sign_in(user);
        provider
    }

    pub fn sign_in(&self, user: CurrentUser) {
        log::info!("Local sign-in of {}", user.email);
        self.user.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        if self.user.send_replace(None).is_some() {
            log::info!("Local sign-out");
        }
    }
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityPort for LocalIdentityProvider {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.user.subscribe()
    }
}
