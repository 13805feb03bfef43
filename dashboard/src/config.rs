//! Dashboard configuration loaded via OrthoConfig.
//!
//! Values come from `DASHBOARD_*` environment variables or a configuration
//! file; every field is optional and falls back to the reqres defaults.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use pagination::PageSize;
use reqwest::Url;
use serde::Deserialize;

use crate::domain::ports::MOCK_AUTH_TOKEN;

const DEFAULT_API_BASE_URL: &str = "https://reqres.in/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_STORAGE_PATH: &str = "dashboard-state.json";

/// Settings for the remote directory, paging, and local state file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Root of the user directory API.
    pub api_base_url: Option<String>,
    /// Value sent in the `x-api-key` header.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Records per dashboard page.
    pub page_size: Option<u32>,
    /// JSON file holding the session and theme.
    pub storage_path: Option<String>,
    /// Start in dark mode when no theme has been stored.
    #[ortho_config(default = false)]
    pub prefers_dark: bool,
}

impl DashboardSettings {
    /// Return the configured API root, falling back to reqres.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not an absolute URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Return the configured API key, falling back to the reqres free key.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or(MOCK_AUTH_TOKEN)
    }

    /// Return the request timeout, falling back to 15 seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return the page size; absent or zero values fall back to six.
    pub fn page_size(&self) -> PageSize {
        self.page_size
            .and_then(|raw| PageSize::new(raw).ok())
            .unwrap_or_default()
    }

    /// Return the state file location, falling back to the working directory.
    pub fn storage_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(
            self.storage_path
                .clone()
                .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_owned()),
        )
    }
}
