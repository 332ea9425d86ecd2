use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::projector::DoctorFallback;

/// Backend address used when `CLINIC_API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8086/api";
/// Session file used when `CLINIC_STORAGE_PATH` is not set.
pub const DEFAULT_STORAGE_PATH: &str = ".clinic/storage.json";
/// How long a notification stays visible.
pub const DEFAULT_NOTIFICATION_SECS: u64 = 5;

/// The client's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    pub api_base_url: String,
    /// File backing the durable session keys.
    pub storage_path: PathBuf,
    /// Auto-dismiss interval for notifications.
    pub notification_ttl: Duration,
    /// What to show when an appointment's doctor is not in the cached list.
    pub doctor_fallback: DoctorFallback,
}

impl Config {
    /// Creates a `Config` pointing at `api_base_url`, with defaults for everything else.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            notification_ttl: Duration::from_secs(DEFAULT_NOTIFICATION_SECS),
            doctor_fallback: DoctorFallback::Embedded,
        }
    }

    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("CLINIC_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let notification_secs: u64 = env::var("CLINIC_NOTIFICATION_SECS")
            .unwrap_or_else(|_| DEFAULT_NOTIFICATION_SECS.to_string())
            .parse()
            .context("Invalid CLINIC_NOTIFICATION_SECS")?;

        let doctor_fallback: DoctorFallback = env::var("CLINIC_DOCTOR_FALLBACK")
            .unwrap_or_else(|_| "embedded".to_string())
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid CLINIC_DOCTOR_FALLBACK")?;

        let mut config = Self::new(base_url);
        config.storage_path = env::var("CLINIC_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH));
        config.notification_ttl = Duration::from_secs(notification_secs);
        config.doctor_fallback = doctor_fallback;

        Ok(config)
    }
}
