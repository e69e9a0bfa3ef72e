use thiserror::Error;

// === ValidationError ===

/// User input that failed validation. The display text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be less than 200 characters")]
    TitleTooLong,
    #[error("URL is required")]
    UrlRequired,
    #[error("URL must start with http:// or https://")]
    UrlScheme,
    /// The URL does not look like `scheme://host.tld/path`.
    #[error("Please enter a valid URL (e.g., https://example.com)")]
    UrlShape,
    #[error("Invalid URL format")]
    UrlFormat,
    /// The owner already saved this URL.
    #[error("This URL is already bookmarked")]
    DuplicateUrl,
}

// === BookmarkError ===

/// Errors related to bookmark operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No authenticated user was supplied.
    #[error("Unauthorized")]
    Unauthorized,
    /// Bookmark with the given ID was not found for the caller.
    #[error("Bookmark not found: {0}")]
    NotFound(String),
    #[error("Bookmark database error: {0}")]
    DatabaseError(String),
}

impl BookmarkError {
    /// Whether the message is meant for the user rather than the log.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            BookmarkError::Validation(_) | BookmarkError::Unauthorized | BookmarkError::NotFound(_)
        )
    }
}

impl From<rusqlite::Error> for BookmarkError {
    fn from(e: rusqlite::Error) -> Self {
        BookmarkError::DatabaseError(e.to_string())
    }
}

// === AuthError ===

/// Errors related to sign-in and sessions.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider refused the authorization code.
    #[error("Code exchange failed: {0}")]
    CodeExchange(String),
    /// The provider could not be reached or returned something unexpected.
    #[error("Identity provider error: {0}")]
    Provider(String),
    #[error("Session database error: {0}")]
    DatabaseError(String),
    #[error("Random generation failed")]
    RandomGeneration,
}

impl From<rusqlite::Error> for AuthError {
    fn from(e: rusqlite::Error) -> Self {
        AuthError::DatabaseError(e.to_string())
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Provider(e.to_string())
    }
}

// === ConfigError ===

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

// === AppError ===

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
