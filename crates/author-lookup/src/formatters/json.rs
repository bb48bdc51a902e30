//! JSON output formatting.

use serde_json::{Value, json};

use crate::lookup::AuthorPublications;
use crate::models::{AuthorSummary, Work};

/// Create a compact work representation for JSON output.
#[must_use]
pub fn compact_work(work: &Work) -> Value {
    let mut obj = json!({
        "title": work.title_or_default(),
        "citations": work.citations(),
    });

    if let Some(doi) = work.doi() {
        obj["doi"] = json!(doi);
    }

    if let Some(created) = work.created_at() {
        obj["created"] = json!(created.to_rfc3339());
    }

    if let Some(year) = work.print_year() {
        obj["year"] = json!(year);
    }

    if let Some(venue) = work.venue() {
        obj["venue"] = json!(venue);
    }

    if let Some(publisher) = &work.publisher {
        obj["publisher"] = json!(publisher);
    }

    if let Some(kind) = &work.work_type {
        obj["type"] = json!(kind);
    }

    obj
}

/// Candidate list with a count, for `--format json` and the HTTP API.
#[must_use]
pub fn candidates_json(authors: &[AuthorSummary]) -> Value {
    json!({
        "count": authors.len(),
        "authors": authors,
    })
}

/// Publication list plus chart data.
#[must_use]
pub fn publications_json(result: &AuthorPublications) -> Value {
    json!({
        "author": result.author,
        "count": result.publications.len(),
        "publications": result.publications.iter().map(compact_work).collect::<Vec<_>>(),
        "topCited": result.top_cited,
        "chart": result.chart,
    })
}
