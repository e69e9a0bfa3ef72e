//! Unit tests for sessions and the OAuth sign-in flow.

use std::sync::Arc;

use futures::future::BoxFuture;
use rusqlite::Connection;
use smartmark::config::OAuthConfig;
use smartmark::database::migrations::run_all;
use smartmark::database::Database;
use smartmark::managers::session_manager::{SessionManager, SessionManagerTrait};
use smartmark::services::auth::{AuthService, IdentityProvider, OAuthProvider};
use smartmark::types::errors::AuthError;
use smartmark::types::user::Identity;

/// Provider that accepts the code "good" and rejects everything else.
struct StubProvider;

impl IdentityProvider for StubProvider {
    fn authorize_url(&self) -> String {
        "https://idp.example.com/authorize".to_string()
    }

    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Identity, AuthError>> {
        Box::pin(async move {
            if code == "good" {
                Ok(Identity {
                    subject: "sub-123".to_string(),
                    email: "alice@example.com".to_string(),
                })
            } else {
                Err(AuthError::CodeExchange("invalid_grant".to_string()))
            }
        })
    }
}

fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_all(&conn).unwrap();
    conn
}

fn identity(subject: &str, email: &str) -> Identity {
    Identity {
        subject: subject.to_string(),
        email: email.to_string(),
    }
}

fn auth_service(ttl: i64) -> AuthService {
    let db = Arc::new(Database::open_in_memory().unwrap());
    AuthService::new(db, Arc::new(StubProvider), ttl)
}

// === SessionManager ===

#[test]
fn test_hash_token_is_sha256_hex() {
    assert_eq!(
        SessionManager::hash_token("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_upsert_user_refreshes_email() {
    let conn = setup_db();
    let mut mgr = SessionManager::new(&conn);

    let first = mgr.upsert_user(&identity("sub-1", "old@example.com")).unwrap();
    let second = mgr.upsert_user(&identity("sub-1", "new@example.com")).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.email, "new@example.com");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_session_round_trip_and_token_not_stored() {
    let conn = setup_db();
    let mut mgr = SessionManager::new(&conn);
    let user = mgr.upsert_user(&identity("sub-1", "a@example.com")).unwrap();

    let session = mgr.create_session(&user, 3600).unwrap();
    assert_eq!(session.token.len(), 43, "32 bytes of base64url without padding");
    assert_eq!(mgr.get_user(&session.token).unwrap(), Some(user));

    let stored: String = conn
        .query_row("SELECT token_hash FROM sessions", [], |row| row.get(0))
        .unwrap();
    assert_ne!(stored, session.token);
    assert_eq!(stored, SessionManager::hash_token(&session.token));
}

#[test]
fn test_tokens_are_unique() {
    let conn = setup_db();
    let mut mgr = SessionManager::new(&conn);
    let user = mgr.upsert_user(&identity("sub-1", "a@example.com")).unwrap();
    let a = mgr.create_session(&user, 3600).unwrap();
    let b = mgr.create_session(&user, 3600).unwrap();
    assert_ne!(a.token, b.token);
}

#[test]
fn test_unknown_and_expired_tokens_resolve_to_none() {
    let conn = setup_db();
    let mut mgr = SessionManager::new(&conn);
    let user = mgr.upsert_user(&identity("sub-1", "a@example.com")).unwrap();
    let expired = mgr.create_session(&user, -10).unwrap();

    assert_eq!(mgr.get_user("not-a-token").unwrap(), None);
    assert_eq!(mgr.get_user(&expired.token).unwrap(), None);
}

#[test]
fn test_delete_and_purge_sessions() {
    let conn = setup_db();
    let mut mgr = SessionManager::new(&conn);
    let user = mgr.upsert_user(&identity("sub-1", "a@example.com")).unwrap();
    let live = mgr.create_session(&user, 3600).unwrap();
    mgr.create_session(&user, -10).unwrap();
    mgr.create_session(&user, -20).unwrap();

    assert_eq!(mgr.purge_expired().unwrap(), 2);
    assert!(mgr.get_user(&live.token).unwrap().is_some());

    mgr.delete_session(&live.token).unwrap();
    assert_eq!(mgr.get_user(&live.token).unwrap(), None);
}

// === AuthService ===

#[tokio::test]
async fn test_exchange_code_creates_session() {
    let auth = auth_service(3600);
    let session = auth.exchange_code_for_session("good").await.unwrap();

    assert_eq!(session.user.id, "sub-123");
    assert_eq!(session.user.email, "alice@example.com");
    assert_eq!(auth.get_user(&session.token).unwrap(), Some(session.user.clone()));
    assert_eq!(auth.current_user(Some(&session.token)), Some(session.user));
}

#[tokio::test]
async fn test_exchange_failure_creates_nothing() {
    let auth = auth_service(3600);
    let err = auth.exchange_code_for_session("bad").await.unwrap_err();
    assert!(matches!(err, AuthError::CodeExchange(_)));
}

#[tokio::test]
async fn test_sign_out_invalidates_session() {
    let auth = auth_service(3600);
    let session = auth.exchange_code_for_session("good").await.unwrap();

    auth.sign_out(&session.token).unwrap();
    assert_eq!(auth.current_user(Some(&session.token)), None);
}

#[tokio::test]
async fn test_purge_expired_sessions() {
    let auth = auth_service(-1);
    let session = auth.exchange_code_for_session("good").await.unwrap();
    assert_eq!(auth.current_user(Some(&session.token)), None);
    assert_eq!(auth.purge_expired_sessions().unwrap(), 1);
}

#[test]
fn test_current_user_without_token() {
    let auth = auth_service(3600);
    assert_eq!(auth.current_user(None), None);
    assert_eq!(auth.authorize_url(), "https://idp.example.com/authorize");
}

// === OAuthProvider ===

#[test]
fn test_oauth_authorize_url_carries_client_and_redirect() {
    let provider = OAuthProvider::new(
        OAuthConfig {
            client_id: "client-1".to_string(),
            client_secret: "secret".to_string(),
            authorize_url: "https://accounts.example.com/auth".to_string(),
            token_url: "https://accounts.example.com/token".to_string(),
            userinfo_url: "https://accounts.example.com/userinfo".to_string(),
        },
        "http://localhost:3000/auth/callback".to_string(),
    );

    let url = reqwest::Url::parse(&provider.authorize_url()).unwrap();
    assert_eq!(url.host_str(), Some("accounts.example.com"));
    assert_eq!(url.path(), "/auth");
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(params.contains(&("client_id".to_string(), "client-1".to_string())));
    assert!(params.contains(&(
        "redirect_uri".to_string(),
        "http://localhost:3000/auth/callback".to_string()
    )));
    assert!(params.contains(&("response_type".to_string(), "code".to_string())));
    assert!(!provider.authorize_url().contains("secret"));
}
