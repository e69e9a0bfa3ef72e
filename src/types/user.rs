use serde::{Deserialize, Serialize};

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// What the OAuth provider reports about the person who signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable subject identifier assigned by the provider.
    pub subject: String,
    pub email: String,
}

/// A server-side login session.
///
/// `token` is only ever held in memory and in the browser cookie; the
/// database keeps its SHA-256 hash.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub expires_at: i64,
}
