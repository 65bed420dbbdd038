use serde::Deserialize;

/// The caller of an authenticated operation. Built from the `username` query
/// parameter, or from `created_by` when creating an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub username: String,
}

impl AuthContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into() }
    }
}

/// Query params carrying the actor for list/update/delete.
#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    pub username: Option<String>,
}
