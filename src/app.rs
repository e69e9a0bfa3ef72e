//! App Core for Smartmark.
//!
//! Central struct holding the change feed and services shared by
//! every request handler.

use std::sync::Arc;

use crate::config::Config;
use crate::database::connection::Database;
use crate::services::auth::{AuthService, IdentityProvider, OAuthProvider};
use crate::services::bookmark_service::BookmarkService;
use crate::services::change_feed::ChangeFeed;
use crate::types::errors::AppError;

/// Central application struct holding all services.
pub struct App {
    pub feed: ChangeFeed,
    pub auth: AuthService,
    pub bookmarks: BookmarkService,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
}

/// Shared handle passed to request handlers.
pub type AppState = Arc<App>;

impl App {
    /// Builds the app from configuration, opening the on-disk database.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let db = Arc::new(Database::open(config.database_path())?);
        let provider = Arc::new(OAuthProvider::new(config.oauth.clone(), config.redirect_uri()));
        let mut app = Self::with_parts(db, provider, config.session_ttl_secs);
        app.cookie_secure = config.cookie_secure;
        Ok(app)
    }

    /// Builds the app around an existing database and identity provider.
    pub fn with_parts(
        db: Arc<Database>,
        provider: Arc<dyn IdentityProvider>,
        session_ttl_secs: i64,
    ) -> Self {
        let feed = ChangeFeed::default();
        let auth = AuthService::new(db.clone(), provider, session_ttl_secs);
        let bookmarks = BookmarkService::new(db, feed.clone());

        Self {
            feed,
            auth,
            bookmarks,
            cookie_secure: false,
        }
    }

    pub fn into_state(self) -> AppState {
        Arc::new(self)
    }
}
