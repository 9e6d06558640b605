/// A role string as stored in the user's role record. The set of roles is
/// open; only some of them carry privileges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthType(String);

impl AuthType {
    pub const OFFICER: &'static str = "officer";
    pub const TECH: &'static str = "tech";

    pub fn new(role: impl Into<String>) -> Self {
        AuthType(role.into())
    }

    pub fn officer() -> Self {
        AuthType::new(Self::OFFICER)
    }

    pub fn tech() -> Self {
        AuthType::new(Self::TECH)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait PermissionPolicy {
    fn has_permissions(&self, role: Option<&AuthType>) -> bool;
}

/// Officers and tech members may create, edit and delete upcoming events.
pub struct EventOrganizerPolicy;

impl PermissionPolicy for EventOrganizerPolicy {
    fn has_permissions(&self, role: Option<&AuthType>) -> bool {
        matches!(
            role.map(AuthType::as_str),
            Some(AuthType::OFFICER | AuthType::TECH)
        )
    }
}
