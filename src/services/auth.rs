//! Authentication for Smartmark.
//!
//! Sign-in is an OAuth 2.0 authorization-code flow against an external
//! provider. The provider is reached through [`IdentityProvider`]; once it
//! vouches for an identity, [`AuthService`] upserts the user and opens a
//! server-side session whose token travels in a cookie.

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Url;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::OAuthConfig;
use crate::database::Database;
use crate::managers::session_manager::{SessionManager, SessionManagerTrait};
use crate::types::errors::AuthError;
use crate::types::user::{Identity, Session, User};

/// An external OAuth identity provider.
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to in order to sign in.
    fn authorize_url(&self) -> String;

    /// Exchanges an authorization code for the identity it was issued to.
    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Identity, AuthError>>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// OAuth 2.0 provider reached over HTTPS with `reqwest`.
pub struct OAuthProvider {
    config: OAuthConfig,
    redirect_uri: String,
    http: reqwest::Client,
}

impl OAuthProvider {
    pub fn new(config: OAuthConfig, redirect_uri: String) -> Self {
        Self {
            config,
            redirect_uri,
            http: reqwest::Client::new(),
        }
    }

    async fn exchange(&self, code: &str) -> Result<Identity, AuthError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::CodeExchange(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }
        let token: TokenResponse = response.json().await?;

        let info: UserInfo = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Identity {
            subject: info.sub,
            email: info.email.unwrap_or_default(),
        })
    }
}

impl IdentityProvider for OAuthProvider {
    fn authorize_url(&self) -> String {
        match Url::parse_with_params(
            &self.config.authorize_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "openid email"),
            ],
        ) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(error = %e, "authorize url is not a valid URL");
                self.config.authorize_url.clone()
            }
        }
    }

    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Identity, AuthError>> {
        Box::pin(self.exchange(code))
    }
}

/// Sessions and sign-in on top of an [`IdentityProvider`].
#[derive(Clone)]
pub struct AuthService {
    db: Arc<Database>,
    provider: Arc<dyn IdentityProvider>,
    session_ttl_secs: i64,
}

impl AuthService {
    pub fn new(db: Arc<Database>, provider: Arc<dyn IdentityProvider>, session_ttl_secs: i64) -> Self {
        Self {
            db,
            provider,
            session_ttl_secs,
        }
    }

    pub fn authorize_url(&self) -> String {
        self.provider.authorize_url()
    }

    /// Exchanges an OAuth code for a new session.
    pub async fn exchange_code_for_session(&self, code: &str) -> Result<Session, AuthError> {
        let identity = self.provider.exchange_code(code).await?;

        let conn = self.db.connection();
        let mut mgr = SessionManager::new(&conn);
        let user = mgr.upsert_user(&identity)?;
        let session = mgr.create_session(&user, self.session_ttl_secs)?;

        info!(user_id = %user.id, "session created");
        Ok(session)
    }

    /// Resolves a session token to its user.
    pub fn get_user(&self, token: &str) -> Result<Option<User>, AuthError> {
        let conn = self.db.connection();
        SessionManager::new(&conn).get_user(token)
    }

    /// Like [`get_user`](Self::get_user) but treats lookup failures as signed out.
    pub fn current_user(&self, token: Option<&str>) -> Option<User> {
        let token = token?;
        match self.get_user(token) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "session lookup failed");
                None
            }
        }
    }

    pub fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let conn = self.db.connection();
        SessionManager::new(&conn).delete_session(token)?;
        info!("session closed");
        Ok(())
    }

    pub fn purge_expired_sessions(&self) -> Result<usize, AuthError> {
        let conn = self.db.connection();
        SessionManager::new(&conn).purge_expired()
    }
}
