//! Input validation for bookmark titles and URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use crate::types::bookmark::MAX_TITLE_CHARS;
use crate::types::errors::ValidationError;

static URL_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(/.*)?$").expect("valid url regex")
});

/// Checks that a title is present and at most 200 characters once trimmed.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}

/// Checks that a URL is an absolute http(s) URL with a dotted host name.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::UrlRequired);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ValidationError::UrlScheme);
    }
    if !URL_SHAPE_RE.is_match(trimmed) {
        return Err(ValidationError::UrlShape);
    }
    Url::parse(trimmed).map_err(|_| ValidationError::UrlFormat)?;
    Ok(())
}
