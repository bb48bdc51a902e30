//! The search → select → publications flow.
//!
//! Each step takes its inputs explicitly; the selected author travels between
//! steps through a [`crate::session`] slot owned by the front end.

use std::sync::Arc;

use serde::Serialize;

use crate::aggregate::{NameQuery, aggregate_authors};
use crate::client::{CrossrefClient, normalize_doi};
use crate::error::{LookupError, LookupResult};
use crate::models::{AuthorSummary, Work};
use crate::ranking::{CitationBar, ChartPoint, TOP_CITED_LIMIT, chart_series, top_cited};

/// Publications of one confirmed author, ready for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPublications {
    /// The selected candidate.
    pub author: AuthorSummary,

    /// Works returned by the full-name query, in API order.
    pub publications: Vec<Work>,

    /// Up to ten most-cited works, descending.
    pub top_cited: Vec<CitationBar>,

    /// Chart series derived from `top_cited`.
    pub chart: Vec<ChartPoint>,
}

/// Lookup operations over a shared Crossref client.
#[derive(Debug, Clone)]
pub struct AuthorLookup {
    client: Arc<CrossrefClient>,
}

impl AuthorLookup {
    /// Create a lookup over `client`.
    #[must_use]
    pub fn new(client: Arc<CrossrefClient>) -> Self {
        Self { client }
    }

    /// Search by name and return disambiguated candidates in first-seen order.
    ///
    /// An empty list means "no matches", not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidArgument`] for a blank name (before any
    /// request is made) or a client error if the search fails.
    pub async fn find_candidates(&self, name: &str) -> LookupResult<Vec<AuthorSummary>> {
        NameQuery::new(name)?;

        let records = self.client.search_by_author_name(name.trim()).await?;
        let candidates = aggregate_authors(&records, name)?;

        tracing::info!(
            query = %name.trim(),
            records = records.len(),
            candidates = candidates.len(),
            "Author search complete"
        );
        Ok(candidates)
    }

    /// Fetch the publications of a selected candidate by full name.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidArgument`] if the candidate has no name,
    /// or a client error if the search fails. Nothing partial is returned.
    pub async fn publications(&self, author: &AuthorSummary) -> LookupResult<AuthorPublications> {
        let full_name = author.full_name();
        if full_name.is_empty() {
            return Err(LookupError::invalid_argument("author", "selected author has no name"));
        }

        let publications = self.client.search_publications(&full_name).await?;
        let top = top_cited(&publications, TOP_CITED_LIMIT);

        tracing::info!(
            author = %full_name,
            publications = publications.len(),
            "Publications fetched"
        );

        Ok(AuthorPublications {
            author: author.clone(),
            chart: chart_series(&top),
            top_cited: top,
            publications,
        })
    }

    /// Fetch one work by DOI.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidArgument`] for a blank DOI (including a
    /// bare `doi:` or resolver prefix), or a client error from the API.
    pub async fn work(&self, doi: &str) -> LookupResult<Work> {
        let bare = normalize_doi(doi);
        if bare.is_empty() {
            return Err(LookupError::invalid_argument("doi", "cannot be empty"));
        }
        Ok(self.client.get_by_doi(bare).await?)
    }
}
