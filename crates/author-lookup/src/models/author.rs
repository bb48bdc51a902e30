//! Author models: raw Crossref mentions and aggregated candidate summaries.

use serde::{Deserialize, Serialize};

/// One author attribution inside a Crossref work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorMention {
    /// Given name(s).
    #[serde(default)]
    pub given: Option<String>,

    /// Family name.
    #[serde(default)]
    pub family: Option<String>,

    /// ORCID URL (e.g., "https://orcid.org/0000-0002-1825-0097").
    #[serde(rename = "ORCID", default)]
    pub orcid: Option<String>,

    /// Affiliations as deposited; the first one is treated as primary.
    #[serde(default)]
    pub affiliation: Vec<Affiliation>,
}

impl AuthorMention {
    /// Given name or "".
    #[must_use]
    pub fn given(&self) -> &str {
        self.given.as_deref().unwrap_or_default()
    }

    /// Family name or "".
    #[must_use]
    pub fn family(&self) -> &str {
        self.family.as_deref().unwrap_or_default()
    }

    /// Name of the first affiliation, if any.
    #[must_use]
    pub fn primary_affiliation(&self) -> Option<&str> {
        self.affiliation.first()?.name.as_deref()
    }
}

/// An institutional affiliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    /// Institution name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A candidate author identity, aggregated over one search.
///
/// This is also the shape handed from the search step to the publications
/// step through the session slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    /// Given name as deposited.
    #[serde(default)]
    pub given: String,

    /// Family name as deposited.
    #[serde(default)]
    pub family: String,

    /// ORCID of the first mention that created this identity.
    #[serde(default)]
    pub orcid: Option<String>,

    /// Affiliations of the first mention.
    #[serde(default)]
    pub affiliation: Vec<Affiliation>,

    /// Titles of the first (up to) three matching works, in scan order.
    #[serde(default)]
    pub recent_publications: Vec<String>,

    /// Distinct venues, in first-seen order.
    #[serde(default)]
    pub recent_venues: Vec<String>,

    /// Distinct print-publication years, ascending.
    #[serde(default)]
    pub year_range: Vec<i32>,

    /// Number of matching mentions.
    #[serde(default)]
    pub total_publications: u32,

    /// Sum of citation counts over matching works.
    #[serde(default)]
    pub citation_count: u64,

    /// `citation_count / total_publications`, rounded to two decimal places.
    ///
    /// Rounded, not padded: 2.5 serializes as `2.5`. Text output pads it to
    /// two places.
    #[serde(default)]
    pub average_citations_per_paper: f64,
}

impl AuthorSummary {
    /// "Given Family", used as the follow-up publications query.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given, self.family).trim().to_string()
    }

    /// Name of the first affiliation, if any.
    #[must_use]
    pub fn primary_affiliation(&self) -> Option<&str> {
        self.affiliation.first()?.name.as_deref()
    }

    /// Publication period for display: "2015 - 2021", "2019" or "N/A".
    #[must_use]
    pub fn publication_period(&self) -> String {
        match (self.year_range.first(), self.year_range.last()) {
            (Some(first), Some(last)) if first != last => format!("{first} - {last}"),
            (Some(year), _) => year.to_string(),
            _ => "N/A".to_string(),
        }
    }
}
