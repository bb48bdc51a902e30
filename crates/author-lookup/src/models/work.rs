//! Work data model matching the Crossref REST API schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuthorMention;

/// A bibliographic work from Crossref.
///
/// Every field is optional on the wire; accessors substitute neutral
/// defaults so one malformed record never aborts a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Work {
    /// Digital Object Identifier.
    #[serde(rename = "DOI", default)]
    pub doi: Option<String>,

    /// Author attributions, in byline order.
    #[serde(default)]
    pub author: Option<Vec<AuthorMention>>,

    /// Titles (Crossref sends a list; the first one is canonical).
    #[serde(default)]
    pub title: Option<Vec<String>>,

    /// Print publication date.
    #[serde(default)]
    pub published_print: Option<DateParts>,

    /// When the record was created in Crossref.
    #[serde(default)]
    pub created: Option<Timestamp>,

    /// Journal, proceedings or book the work appeared in.
    #[serde(default)]
    pub container_title: Option<Vec<String>>,

    /// Publisher name.
    #[serde(default)]
    pub publisher: Option<String>,

    /// Work type (e.g., "journal-article").
    #[serde(rename = "type", default)]
    pub work_type: Option<String>,

    /// Number of works citing this one.
    #[serde(default)]
    pub is_referenced_by_count: Option<u64>,
}

impl Work {
    /// Author mentions, empty when the record has no author list.
    #[must_use]
    pub fn authors(&self) -> &[AuthorMention] {
        self.author.as_deref().unwrap_or_default()
    }

    /// First title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref()?.first().map(String::as_str)
    }

    /// First title, falling back to "No title available".
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title().unwrap_or("No title available")
    }

    /// Venue name (first container title), ignoring blanks.
    #[must_use]
    pub fn venue(&self) -> Option<&str> {
        self.container_title
            .as_ref()?
            .first()
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Year of print publication.
    #[must_use]
    pub fn print_year(&self) -> Option<i32> {
        self.published_print.as_ref()?.year()
    }

    /// Citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> u64 {
        self.is_referenced_by_count.unwrap_or(0)
    }

    /// Creation timestamp, parsed.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.as_ref()?.parsed()
    }

    /// Get the DOI if available.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref().filter(|d| !d.is_empty())
    }

    /// Resolver link for the DOI.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        self.doi().map(|doi| format!("https://doi.org/{doi}"))
    }
}

/// Crossref partial date: `{"date-parts": [[2020, 5, 17]]}`.
///
/// Parts may be `null` for undated records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DateParts {
    /// One or more `[year, month?, day?]` tuples.
    #[serde(default)]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl DateParts {
    /// Year of the first date, if present.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date_parts.first()?.first().copied().flatten()
    }
}

/// Crossref full timestamp (`created`, `deposited`, `indexed`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Timestamp {
    /// Date parts of the timestamp.
    #[serde(default)]
    pub date_parts: Vec<Vec<Option<i32>>>,

    /// RFC 3339 date-time.
    #[serde(default)]
    pub date_time: Option<String>,

    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl Timestamp {
    /// Parse `date-time`, falling back to the epoch milliseconds.
    #[must_use]
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        self.date_time
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| self.timestamp.and_then(DateTime::from_timestamp_millis))
    }
}

/// Crossref response envelope: `{"status", "message-type", "message"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Envelope<T> {
    /// "ok" on success.
    #[serde(default)]
    pub status: String,

    /// "work", "work-list", ...
    #[serde(default)]
    pub message_type: String,

    /// Payload.
    pub message: T,
}

/// Payload of a works search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkList {
    /// Total number of matching works (not just this page).
    #[serde(default)]
    pub total_results: u64,

    /// Works in this response.
    #[serde(default)]
    pub items: Vec<Work>,
}
