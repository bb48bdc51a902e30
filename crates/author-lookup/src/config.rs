//! Configuration for the Crossref author lookup.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Crossref REST API.
    pub const BASE_URL: &str = "https://api.crossref.org";

    /// Result-count cap for every search request.
    pub const ROWS: u32 = 100;

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// User agent sent with every request.
    pub const USER_AGENT: &str = concat!("author-lookup/", env!("CARGO_PKG_VERSION"));
}

/// Work field projections for `select=`.
pub mod fields {
    /// Fields needed to disambiguate authors from a name search.
    pub const AUTHOR_SEARCH: &[&str] = &[
        "DOI",
        "author",
        "title",
        "published-print",
        "container-title",
        "publisher",
        "type",
        "is-referenced-by-count",
    ];

    /// Fields needed for the publication list and citation chart.
    pub const PUBLICATIONS: &[&str] = &[
        "DOI",
        "author",
        "title",
        "published-print",
        "created",
        "container-title",
        "publisher",
        "type",
        "is-referenced-by-count",
    ];
}

/// Default location of the CLI session slot.
pub const DEFAULT_SESSION_FILE: &str = ".author-lookup/selection.json";

/// Lookup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the Crossref API (overridable for mock servers).
    pub api_url: String,

    /// Contact address sent as `mailto` (Crossref "polite pool").
    pub mailto: Option<String>,

    /// Result-count cap per search.
    pub rows: u32,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Where the CLI keeps the selected author between steps.
    pub session_file: PathBuf,
}

impl Config {
    /// Create a configuration against the public Crossref API.
    #[must_use]
    pub fn new(mailto: Option<String>) -> Self {
        Self {
            api_url: api::BASE_URL.to_string(),
            mailto,
            rows: api::ROWS,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }

    /// Create a test configuration with a custom URL for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_url: base_url.trim_end_matches('/').to_string(),
            mailto: Some("test@example.org".to_string()),
            rows: api::ROWS,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            session_file: std::env::temp_dir().join("author-lookup-test-selection.json"),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `CROSSREF_API_URL`, `CROSSREF_MAILTO` and `AUTHOR_LOOKUP_SESSION`.
    ///
    /// # Errors
    ///
    /// Returns error if `CROSSREF_API_URL` is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let mailto = std::env::var("CROSSREF_MAILTO").ok().filter(|m| !m.trim().is_empty());
        let mut config = Self::new(mailto);

        if let Ok(raw) = std::env::var("CROSSREF_API_URL") {
            config = config.with_api_url(&raw)?;
        }
        if let Ok(path) = std::env::var("AUTHOR_LOOKUP_SESSION") {
            config.session_file = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Replace the API base URL after validating it.
    ///
    /// # Errors
    ///
    /// Returns error if `raw` does not parse as an http(s) URL.
    pub fn with_api_url(mut self, raw: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(raw).with_context(|| format!("invalid API URL: {raw}"))?;
        anyhow::ensure!(
            matches!(parsed.scheme(), "http" | "https"),
            "API URL must be http or https, got {}",
            parsed.scheme()
        );
        self.api_url = raw.trim_end_matches('/').to_string();
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
