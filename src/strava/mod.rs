//! Strava web-service client: authorization and activity upload.
//!
//! - [`auth`] - token cache, refresh, and the browser authorization flow
//! - [`callback`] - one-shot loopback listener for the redirect
//! - [`upload`] - multipart activity upload and status polling

pub mod auth;
pub mod callback;
pub mod upload;

pub use auth::{AuthError, Authenticator, StoredTokens, TokenCache};
pub use callback::CallbackError;
pub use upload::{ActivityRef, UploadError, Uploader};
