//! Runtime configuration, read from environment variables.

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::types::errors::ConfigError;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;
pub const DEFAULT_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// OAuth client registration and provider endpoints.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub data_dir: PathBuf,
    /// Externally visible origin, used to build the OAuth redirect URI.
    pub public_url: String,
    pub session_ttl_secs: i64,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
    pub oauth: OAuthConfig,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let oauth = OAuthConfig {
            client_id: required(&lookup, "OAUTH_CLIENT_ID")?,
            client_secret: required(&lookup, "OAUTH_CLIENT_SECRET")?,
            authorize_url: or_default(&lookup, "OAUTH_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL),
            token_url: or_default(&lookup, "OAUTH_TOKEN_URL", DEFAULT_TOKEN_URL),
            userinfo_url: or_default(&lookup, "OAUTH_USERINFO_URL", DEFAULT_USERINFO_URL),
        };

        let session_ttl_secs: i64 = parsed(
            &lookup,
            "SMARTMARK_SESSION_TTL_SECS",
            &DEFAULT_SESSION_TTL_SECS.to_string(),
        )?;
        if session_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "SMARTMARK_SESSION_TTL_SECS",
                value: session_ttl_secs.to_string(),
            });
        }

        Ok(Self {
            bind: parsed(&lookup, "SMARTMARK_BIND", DEFAULT_BIND)?,
            data_dir: PathBuf::from(or_default(&lookup, "SMARTMARK_DATA_DIR", ".")),
            public_url: or_default(&lookup, "SMARTMARK_PUBLIC_URL", DEFAULT_PUBLIC_URL)
                .trim_end_matches('/')
                .to_string(),
            session_ttl_secs,
            cookie_secure: parsed(&lookup, "SMARTMARK_COOKIE_SECURE", "false")?,
            oauth,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("smartmark.db")
    }

    pub fn redirect_uri(&self) -> String {
        format!("{}/auth/callback", self.public_url)
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = or_default(lookup, key, default);
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}
