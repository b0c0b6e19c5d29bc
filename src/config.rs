//! Client configuration.

use std::time::Duration;

use crate::stream::RECORD_SEPARATOR;

/// Default renderer address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Endpoint accepting render scripts.
pub const DEFAULT_RENDER_PATH: &str = "/cgi-bin/render.pl";
/// File name used when exporting every artifact as one archive.
pub const DEFAULT_ARCHIVE_NAME: &str = "stls.zip";
/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the render client.
///
/// Use the builder methods to customize.
///
/// # Example
///
/// ```
/// use meshcast::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://render.local:8080")
///     .with_archive_name("parts.zip");
/// assert_eq!(config.render_url(), "http://render.local:8080/cgi-bin/render.pl");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Renderer base URL
    pub base_url: String,
    /// Path of the render endpoint
    pub render_path: String,
    /// How long to wait for the connection to be established
    pub connect_timeout: Duration,
    /// Download name for "export all"
    pub archive_name: String,
    /// Also report dropped records as error entries in the session log
    pub surface_record_errors: bool,
    /// Byte terminating each protocol record
    pub record_separator: u8,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            render_path: DEFAULT_RENDER_PATH.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            surface_record_errors: false,
            record_separator: RECORD_SEPARATOR,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the renderer base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the render endpoint path.
    pub fn with_render_path(mut self, path: impl Into<String>) -> Self {
        self.render_path = path.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the archive download name.
    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = name.into();
        self
    }

    /// Set whether dropped records show up in the session log.
    pub fn with_surface_record_errors(mut self, surface: bool) -> Self {
        self.surface_record_errors = surface;
        self
    }

    /// Full URL of the render endpoint.
    pub fn render_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.render_path.trim_start_matches('/')
        )
    }

    /// Create config from environment variables.
    ///
    /// - `MESHCAST_URL` - renderer base URL
    /// - `MESHCAST_CONNECT_TIMEOUT_SECS` - connect timeout
    /// - `MESHCAST_ARCHIVE_NAME` - archive download name
    /// - `MESHCAST_SURFACE_RECORD_ERRORS` - `1`/`true` to log dropped records
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MESHCAST_URL") {
            config.base_url = url;
        }
        if let Some(secs) = std::env::var("MESHCAST_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Ok(name) = std::env::var("MESHCAST_ARCHIVE_NAME") {
            config.archive_name = name;
        }
        if let Ok(flag) = std::env::var("MESHCAST_SURFACE_RECORD_ERRORS") {
            config.surface_record_errors = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        config
    }
}
