use tokio::sync::watch;

use crate::domain::session::CurrentUser;

pub trait IdentityPort {
    fn current_user(&self) -> Option<CurrentUser>;
    /// The receiver is marked changed on every sign-in and sign-out.
    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>>;
}
