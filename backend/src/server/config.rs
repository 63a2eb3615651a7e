//! HTTP server configuration object and helpers.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use ward_ops::settings::{ApiKey, AppSettings};

/// Connection details for the hosted backend.
pub struct BackendConfig {
    pub(crate) url: Url,
    pub(crate) api_key: ApiKey,
    pub(crate) timeout: Duration,
}

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) backend: Option<BackendConfig>,
    pub(crate) backup_dir: PathBuf,
    pub(crate) roster_window: usize,
    pub(crate) utc_offset_minutes: i32,
}

impl ServerConfig {
    /// Resolve loaded settings, applying defaults.
    ///
    /// Without a backend URL the server falls back to fixture ports.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the backend URL does not parse or is given
    /// without an API key.
    pub fn from_settings(mut settings: AppSettings) -> io::Result<Self> {
        let api_key = settings.take_api_key();
        let backend = match (settings.backend_url.as_deref(), api_key) {
            (None, _) => None,
            (Some(raw), Some(api_key)) => {
                let url = Url::parse(raw).map_err(|err| {
                    io::Error::other(format!("invalid backend URL `{raw}`: {err}"))
                })?;
                Some(BackendConfig {
                    url,
                    api_key,
                    timeout: settings.request_timeout(),
                })
            }
            (Some(_), None) => {
                return Err(io::Error::other(
                    "WARD_OPS_API_KEY must be set when WARD_OPS_BACKEND_URL is configured",
                ));
            }
        };

        Ok(Self {
            bind_addr: settings.bind_addr().to_owned(),
            backend,
            backup_dir: settings.backup_dir(),
            roster_window: settings.roster_window(),
            utc_offset_minutes: settings.utc_offset_minutes(),
        })
    }

    /// Return the address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
}
