use smartmark::types::errors::*;

// === ValidationError Tests ===

#[test]
fn validation_error_messages_are_user_facing() {
    assert_eq!(ValidationError::TitleRequired.to_string(), "Title is required");
    assert_eq!(
        ValidationError::TitleTooLong.to_string(),
        "Title must be less than 200 characters"
    );
    assert_eq!(ValidationError::UrlRequired.to_string(), "URL is required");
    assert_eq!(
        ValidationError::UrlScheme.to_string(),
        "URL must start with http:// or https://"
    );
    assert_eq!(
        ValidationError::UrlShape.to_string(),
        "Please enter a valid URL (e.g., https://example.com)"
    );
    assert_eq!(ValidationError::UrlFormat.to_string(), "Invalid URL format");
    assert_eq!(
        ValidationError::DuplicateUrl.to_string(),
        "This URL is already bookmarked"
    );
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_wraps_validation_transparently() {
    let err: BookmarkError = ValidationError::DuplicateUrl.into();
    assert_eq!(err.to_string(), "This URL is already bookmarked");
    assert!(err.is_user_facing());
}

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(BookmarkError::Unauthorized.to_string(), "Unauthorized");
    assert_eq!(
        BookmarkError::NotFound("bm-1".to_string()).to_string(),
        "Bookmark not found: bm-1"
    );
    assert_eq!(
        BookmarkError::DatabaseError("disk full".to_string()).to_string(),
        "Bookmark database error: disk full"
    );
}

#[test]
fn database_errors_are_not_user_facing() {
    assert!(BookmarkError::Unauthorized.is_user_facing());
    assert!(BookmarkError::NotFound("x".to_string()).is_user_facing());
    assert!(!BookmarkError::DatabaseError("boom".to_string()).is_user_facing());
}

#[test]
fn rusqlite_error_converts_to_database_error() {
    let err: BookmarkError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, BookmarkError::DatabaseError(_)));
}

// === AuthError / ConfigError Tests ===

#[test]
fn auth_error_display_variants() {
    assert_eq!(
        AuthError::CodeExchange("bad code".to_string()).to_string(),
        "Code exchange failed: bad code"
    );
    assert_eq!(
        AuthError::Provider("timeout".to_string()).to_string(),
        "Identity provider error: timeout"
    );
}

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::Missing("OAUTH_CLIENT_ID").to_string(),
        "Missing required setting: OAUTH_CLIENT_ID"
    );
    assert_eq!(
        ConfigError::Invalid {
            key: "SMARTMARK_BIND",
            value: "nope".to_string()
        }
        .to_string(),
        "Invalid value for SMARTMARK_BIND: nope"
    );
}

#[test]
fn errors_implement_error_trait() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<ValidationError>();
    assert_error::<BookmarkError>();
    assert_error::<AuthError>();
    assert_error::<ConfigError>();
    assert_error::<AppError>();
}
