//! Crossref REST API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - A fixed `select=` projection and `rows=` cap per search
//! - Status-code classification into [`ClientError`]
//!
//! Each call issues exactly one request. There is no retry and no cache.

use reqwest::Client;
use url::Url;

use crate::config::{Config, api, fields};
use crate::error::{ClientError, ClientResult};
use crate::models::{Envelope, Work, WorkList};

/// Crossref API client.
#[derive(Clone)]
pub struct CrossrefClient {
    /// HTTP client.
    client: Client,

    /// API base URL.
    base: Url,

    /// Contact address for the polite pool.
    mailto: Option<String>,

    /// Result-count cap per search.
    rows: u32,
}

impl CrossrefClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is unusable or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let base = Url::parse(&config.api_url)?;
        anyhow::ensure!(!base.cannot_be_a_base(), "API URL cannot be a base: {base}");

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(api::USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        Ok(Self { client, base, mailto: config.mailto, rows: config.rows })
    }

    /// Check if a contact address is configured.
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }

    /// Search works by free-text author name, projected for disambiguation.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status.
    pub async fn search_by_author_name(&self, name: &str) -> ClientResult<Vec<Work>> {
        let list = self.search_works(name, fields::AUTHOR_SEARCH).await?;
        Ok(list.items)
    }

    /// Search works for a confirmed author's full name, projected for the
    /// publication list (includes `created`).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status.
    pub async fn search_publications(&self, full_name: &str) -> ClientResult<Vec<Work>> {
        let list = self.search_works(full_name, fields::PUBLICATIONS).await?;
        Ok(list.items)
    }

    /// Get a single work by DOI.
    ///
    /// Accepts bare DOIs as well as `doi:` and `https://doi.org/` forms.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for unknown DOIs, or another error on
    /// API failure.
    pub async fn get_by_doi(&self, doi: &str) -> ClientResult<Work> {
        let url = self.endpoint(&["works"], Some(normalize_doi(doi)));
        let envelope: Envelope<Work> = self.get(url, &self.base_params()).await?;
        Ok(envelope.message)
    }

    /// One bounded `/works?query.author=` request.
    async fn search_works(&self, author_query: &str, select: &[&str]) -> ClientResult<WorkList> {
        let url = self.endpoint(&["works"], None);

        let mut params = vec![
            ("query.author".to_string(), author_query.to_string()),
            ("rows".to_string(), self.rows.to_string()),
            ("select".to_string(), select.join(",")),
        ];
        params.extend(self.base_params());

        tracing::debug!(query = %author_query, rows = self.rows, "Searching Crossref works");
        let envelope: Envelope<WorkList> = self.get(url, &params).await?;
        tracing::debug!(
            returned = envelope.message.items.len(),
            total = envelope.message.total_results,
            "Crossref search complete"
        );

        Ok(envelope.message)
    }

    /// Parameters sent with every request.
    fn base_params(&self) -> Vec<(String, String)> {
        self.mailto.iter().map(|m| ("mailto".to_string(), m.clone())).collect()
    }

    /// Build `{base}/{segments...}/{doi}` with each path segment percent-encoded.
    fn endpoint(&self, segments: &[&str], doi: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
            if let Some(doi) = doi {
                path.extend(doi.split('/'));
            }
        }
        url
    }

    /// Make a GET request.
    async fn get<T>(&self, url: Url, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).query(params).send().await?;

        let response = self.handle_response(response).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), path = %url, "Crossref request failed");

        match status.as_u16() {
            404 => Err(ClientError::not_found(url)),
            code => Err(ClientError::upstream(code, text)),
        }
    }
}

/// Strip resolver prefixes so only the bare DOI goes into the path.
pub(crate) fn normalize_doi(doi: &str) -> &str {
    let doi = doi.trim();
    ["https://doi.org/", "http://doi.org/", "https://dx.doi.org/", "doi:"]
        .iter()
        .find_map(|prefix| doi.strip_prefix(prefix))
        .map_or(doi, str::trim)
}

impl std::fmt::Debug for CrossrefClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossrefClient")
            .field("base", &self.base.as_str())
            .field("has_mailto", &self.has_mailto())
            .field("rows", &self.rows)
            .finish()
    }
}
