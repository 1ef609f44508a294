//! Activity upload and status polling.
//!
//! Uploads are asynchronous on Strava's side: the POST returns an upload
//! id, and the upload resolves to a created activity (or an error) some
//! polls later. Poll interval and attempt limit come from configuration.

use std::path::Path;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use super::auth::{AuthError, Authenticator};
use crate::config::{StravaConfig, UploadConfig};

const UPLOADS_URL: &str = "https://www.strava.com/api/v3/uploads";

/// Errors from uploading one activity. Date-scoped: an upload failure
/// skips that date's upload, not the run.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upload rejected: {0}")]
    Rejected(String),

    #[error("upload {id} failed: {error}")]
    Processing { id: u64, error: String },

    #[error("upload {id} still processing after {attempts} polls")]
    PollTimeout { id: u64, attempts: u32 },

    #[error("could not read activity file: {0}")]
    Io(#[from] std::io::Error),
}

/// Upload status as reported by the uploads endpoint.
#[derive(Debug, Deserialize)]
struct UploadStatus {
    id: u64,
    error: Option<String>,
    activity_id: Option<u64>,
}

/// A created activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRef {
    pub upload_id: u64,
    pub activity_id: u64,
}

impl ActivityRef {
    /// Web URL of the activity.
    pub fn url(&self) -> String {
        format!("https://www.strava.com/activities/{}", self.activity_id)
    }
}

/// Uploads cleaned documents as activities, authorizing lazily on the
/// first upload so a dry run never touches the network.
pub struct Uploader {
    auth: Authenticator,
    strava: StravaConfig,
    upload: UploadConfig,
    http: reqwest::blocking::Client,
}

impl Uploader {
    pub fn new(strava: &StravaConfig, upload: &UploadConfig) -> Self {
        Self {
            auth: Authenticator::new(strava),
            strava: strava.clone(),
            upload: upload.clone(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Uploads a TCX document and waits for the activity to exist.
    pub fn upload(&self, tcx_path: &Path) -> Result<ActivityRef, UploadError> {
        let token = self.auth.access_token()?;

        info!("uploading {}", tcx_path.display());
        let form = reqwest::blocking::multipart::Form::new()
            .text("data_type", "tcx")
            .text("name", self.strava.activity_name.clone())
            .text("trainer", if self.strava.trainer { "1" } else { "0" })
            .file("file", tcx_path)?;
        let response = self
            .http
            .post(UPLOADS_URL)
            .bearer_auth(&token)
            .multipart(form)
            .send()?;
        if !response.status().is_success() {
            return Err(UploadError::Rejected(response.text().unwrap_or_default()));
        }
        let mut status: UploadStatus = response.json()?;

        let mut attempts = 0u32;
        loop {
            if let Some(error) = status.error.filter(|e| !e.is_empty()) {
                return Err(UploadError::Processing {
                    id: status.id,
                    error,
                });
            }
            if let Some(activity_id) = status.activity_id {
                let activity = ActivityRef {
                    upload_id: status.id,
                    activity_id,
                };
                info!("upload {} created activity {activity_id}", status.id);
                return Ok(activity);
            }
            if attempts >= self.upload.poll_max_attempts {
                return Err(UploadError::PollTimeout {
                    id: status.id,
                    attempts,
                });
            }
            attempts += 1;
            thread::sleep(Duration::from_secs(self.upload.poll_interval_secs));
            debug!("polling upload {} (attempt {attempts})", status.id);
            let response = self
                .http
                .get(format!("{UPLOADS_URL}/{}", status.id))
                .bearer_auth(&token)
                .send()?;
            status = response.json()?;
        }
    }

    /// Opens the created activity in the browser, best-effort.
    pub fn open_activity(&self, activity: &ActivityRef) {
        if !self.strava.open_activity {
            return;
        }
        if open::that(activity.url()).is_err() {
            info!("could not open a browser; activity is at {}", activity.url());
        }
    }
}
