//! Server settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, a config file or a
//! `WARD_OPS_*` environment variable. Missing values fall back to defaults;
//! without a backend URL the server runs against in-memory fixtures.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::{DEFAULT_ROSTER_WINDOW, DEFAULT_UTC_OFFSET_MINUTES};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BACKUP_DIR: &str = "roster-backups";

/// Length of the API key fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Configuration values for the ward operations server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WARD_OPS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Base URL of the PostgREST-compatible backend, e.g.
    /// `https://db.example.org/rest/v1/`.
    pub backend_url: Option<String>,
    /// API key sent to the backend.
    pub api_key: Option<String>,
    /// Per-request timeout for backend calls, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Number of recent roster rows fetched on load.
    pub roster_window: Option<usize>,
    /// Roster time zone as minutes east of UTC.
    pub utc_offset_minutes: Option<i32>,
    /// Directory receiving snapshots of failed saves.
    pub backup_dir: Option<PathBuf>,
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Backend request timeout, falling back to ten seconds.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Roster rows fetched on load, falling back to 30.
    #[must_use]
    pub fn roster_window(&self) -> usize {
        self.roster_window
            .filter(|window| *window > 0)
            .unwrap_or(DEFAULT_ROSTER_WINDOW)
    }

    /// Roster UTC offset in minutes, falling back to +05:30.
    #[must_use]
    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes.unwrap_or(DEFAULT_UTC_OFFSET_MINUTES)
    }

    /// Backup directory, falling back to `roster-backups`.
    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_DIR))
    }

    /// Move the API key out of the settings so only one copy remains.
    pub fn take_api_key(&mut self) -> Option<ApiKey> {
        self.api_key.take().map(ApiKey::new)
    }
}

/// Backend API key, wiped from memory on drop.
///
/// Debug output shows only a fingerprint.
///
/// # Examples
/// ```
/// use ward_ops::settings::ApiKey;
///
/// let key = ApiKey::new("service-role-key".to_owned());
/// let fingerprint = key.fingerprint();
/// assert_eq!(fingerprint.len(), 16);
/// assert!(!format!("{key:?}").contains("service-role-key"));
/// ```
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Take ownership of the key material.
    #[must_use]
    pub fn new(key: String) -> Self {
        Self(Zeroizing::new(key))
    }

    /// The raw key, for building request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// First eight bytes of the key's SHA-256 digest as lowercase hex.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.fingerprint()).finish()
    }
}
