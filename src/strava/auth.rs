//! Strava authorization: token cache, refresh, and the browser flow.
//!
//! Tokens are cached in a JSON file across runs. Getting an access token
//! tries the cheapest path first: a cached token that hasn't expired, then
//! a refresh with the cached refresh token, and only then the full
//! browser authorization with the loopback listener.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use super::callback::{self, CallbackError};
use crate::config::StravaConfig;

const AUTHORIZE_URL: &str = "https://www.strava.com/oauth/authorize";
const TOKEN_URL: &str = "https://www.strava.com/oauth/token";
const SCOPES: &str = "activity:write,activity:read_all";

/// Don't use a cached token this close to its expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Authorization errors. A failure here skips the run's uploads; it never
/// destroys pipeline output.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("strava client_id/client_secret are not configured; edit the config file")]
    MissingCredentials,

    #[error("browser authorization failed: {0}")]
    Callback(#[from] CallbackError),

    #[error("token endpoint rejected the request: {0}")]
    TokenEndpoint(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("token cache error: {0}")]
    Cache(#[from] std::io::Error),
}

/// Tokens as persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp the access token expires at.
    pub expires_at: i64,
}

impl StoredTokens {
    /// Whether the access token is still usable, with a safety margin.
    pub fn is_fresh(&self, now: i64) -> bool {
        self.expires_at > now + EXPIRY_MARGIN_SECS
    }
}

/// What the token endpoint returns for both code exchange and refresh.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_at: i64,
}

/// File-backed token cache.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `<config dir>/rideup/tokens.json`.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("rideup").join("tokens.json"))
    }

    /// Loads cached tokens; any unreadable or unparseable cache reads as
    /// no cache.
    pub fn load(&self) -> Option<StoredTokens> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(tokens) => Some(tokens),
            Err(err) => {
                warn!("ignoring unreadable token cache {}: {err}", self.path.display());
                None
            }
        }
    }

    /// Persists tokens, owner-readable only on unix.
    pub fn store(&self, tokens: &StoredTokens) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(tokens)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        fs::write(&self.path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    /// Drops the cache; missing cache is fine.
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// Obtains access tokens for one run's uploads.
pub struct Authenticator {
    config: StravaConfig,
    cache: TokenCache,
    http: reqwest::blocking::Client,
}

impl Authenticator {
    pub fn new(config: &StravaConfig) -> Self {
        let path = TokenCache::default_path().unwrap_or_else(|| PathBuf::from("tokens.json"));
        Self::with_cache(config, TokenCache::new(path))
    }

    pub fn with_cache(config: &StravaConfig, cache: TokenCache) -> Self {
        Self {
            config: config.clone(),
            cache,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Returns a usable access token: cached, refreshed, or from a fresh
    /// browser authorization.
    pub fn access_token(&self) -> Result<String, AuthError> {
        if self.config.client_id.is_empty() || self.config.client_secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        if let Some(tokens) = self.cache.load() {
            if tokens.is_fresh(Utc::now().timestamp()) {
                debug!("using cached access token");
                return Ok(tokens.access_token);
            }
            match self.refresh(&tokens.refresh_token) {
                Ok(access_token) => return Ok(access_token),
                Err(err) => {
                    warn!("token refresh failed, falling back to browser authorization: {err}")
                }
            }
        }

        self.authorize_in_browser()
    }

    /// Whether a refresh token is cached (logged-in state).
    pub fn is_authorized(&self) -> bool {
        self.cache.load().is_some()
    }

    /// Forgets cached tokens.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.cache.clear()?;
        Ok(())
    }

    fn authorize_in_browser(&self) -> Result<String, AuthError> {
        let redirect_uri = format!("http://localhost:{}/callback", self.config.redirect_port);
        let mut url = Url::parse(AUTHORIZE_URL).map_err(|_| {
            AuthError::TokenEndpoint("authorize URL is invalid".to_string())
        })?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("approval_prompt", "auto")
            .append_pair("scope", SCOPES);

        info!("opening browser for Strava authorization");
        if open::that(url.as_str()).is_err() {
            info!("could not open a browser; authorize manually at:\n{url}");
        }

        let code = callback::wait_for_code(
            self.config.redirect_port,
            Duration::from_secs(self.config.auth_timeout_secs),
        )?;
        debug!("authorization code received, exchanging for tokens");
        let tokens = self.exchange(&[
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", &code),
            ("grant_type", "authorization_code"),
        ])?;
        Ok(tokens.access_token)
    }

    fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        debug!("refreshing expired access token");
        let tokens = self.exchange(&[
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])?;
        Ok(tokens.access_token)
    }

    fn exchange(&self, params: &[(&str, &str)]) -> Result<StoredTokens, AuthError> {
        let response = self.http.post(TOKEN_URL).form(params).send()?;
        if !response.status().is_success() {
            return Err(AuthError::TokenEndpoint(
                response.text().unwrap_or_default(),
            ));
        }
        let token: TokenResponse = response.json()?;
        let stored = StoredTokens {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token.expires_at,
        };
        if let Err(err) = self.cache.store(&stored) {
            warn!("could not persist tokens: {err}");
        }
        Ok(stored)
    }
}
