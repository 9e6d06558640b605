use crate::domain::role::AuthType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl CurrentUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }
}

/// Who is acting and with which role. Passed explicitly into every operation
/// that needs authorization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<CurrentUser>,
    pub auth_type: Option<AuthType>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: CurrentUser, auth_type: Option<AuthType>) -> Self {
        Self {
            user: Some(user),
            auth_type,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
