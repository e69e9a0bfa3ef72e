//! Session Manager for Smartmark.
//!
//! Stores users and login sessions in SQLite. Session tokens are random
//! 32-byte values encoded as base64url; only their SHA-256 hash is persisted.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::digest::{digest, SHA256};
use ring::rand::{SecureRandom, SystemRandom};
use rusqlite::{params, Connection, OptionalExtension};

use crate::types::errors::AuthError;
use crate::types::user::{Identity, Session, User};

/// Trait defining session storage operations.
pub trait SessionManagerTrait {
    /// Inserts the user if new, refreshes the email otherwise.
    fn upsert_user(&mut self, identity: &Identity) -> Result<User, AuthError>;
    fn create_session(&mut self, user: &User, ttl_secs: i64) -> Result<Session, AuthError>;
    /// Resolves a token to its user. Expired sessions resolve to `None`.
    fn get_user(&self, token: &str) -> Result<Option<User>, AuthError>;
    fn delete_session(&mut self, token: &str) -> Result<(), AuthError>;
    /// Removes expired sessions; returns how many were dropped.
    fn purge_expired(&mut self) -> Result<usize, AuthError>;
}

/// Session manager backed by a SQLite connection.
pub struct SessionManager<'a> {
    conn: &'a Connection,
    rng: SystemRandom,
}

impl<'a> SessionManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            rng: SystemRandom::new(),
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Hex-encoded SHA-256 of a session token.
    pub fn hash_token(token: &str) -> String {
        digest(&SHA256, token.as_bytes())
            .as_ref()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    fn generate_token(&self) -> Result<String, AuthError> {
        let mut bytes = [0u8; 32];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AuthError::RandomGeneration)?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl<'a> SessionManagerTrait for SessionManager<'a> {
    fn upsert_user(&mut self, identity: &Identity) -> Result<User, AuthError> {
        self.conn.execute(
            "INSERT INTO users (id, email, created_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(id) DO UPDATE SET email = excluded.email",
            params![identity.subject, identity.email, Self::now()],
        )?;
        Ok(User {
            id: identity.subject.clone(),
            email: identity.email.clone(),
        })
    }

    fn create_session(&mut self, user: &User, ttl_secs: i64) -> Result<Session, AuthError> {
        let token = self.generate_token()?;
        let now = Self::now();
        let expires_at = now + ttl_secs;

        self.conn.execute(
            "INSERT INTO sessions (token_hash, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            params![Self::hash_token(&token), user.id, now, expires_at],
        )?;

        Ok(Session {
            token,
            user: user.clone(),
            expires_at,
        })
    }

    fn get_user(&self, token: &str) -> Result<Option<User>, AuthError> {
        let user = self
            .conn
            .query_row(
                "SELECT u.id, u.email FROM sessions s JOIN users u ON u.id = s.user_id \
                 WHERE s.token_hash = ?1 AND s.expires_at > ?2",
                params![Self::hash_token(token), Self::now()],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn delete_session(&mut self, token: &str) -> Result<(), AuthError> {
        self.conn.execute(
            "DELETE FROM sessions WHERE token_hash = ?1",
            params![Self::hash_token(token)],
        )?;
        Ok(())
    }

    fn purge_expired(&mut self) -> Result<usize, AuthError> {
        let removed = self.conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?1",
            params![Self::now()],
        )?;
        Ok(removed)
    }
}
