//! Top-cited projection of an author's publications, and the chart series it feeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Work;

/// Bars shown in the citation chart.
pub const TOP_CITED_LIMIT: usize = 10;

/// Characters of the title kept in a bar label.
pub const LABEL_CHARS: usize = 30;

/// One publication projected for the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationBar {
    /// Truncated title.
    pub label: String,

    /// Citation count (0 if absent).
    pub citations: u64,

    /// Creation date, if the record carries a parseable one.
    pub date: Option<DateTime<Utc>>,
}

impl CitationBar {
    /// Project a work.
    #[must_use]
    pub fn from_work(work: &Work) -> Self {
        Self {
            label: truncate_label(work.title().unwrap_or_default()),
            citations: work.citations(),
            date: work.created_at(),
        }
    }
}

/// A `(label, value)` pair handed to a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Category label.
    pub label: String,

    /// Bar height.
    pub value: f64,
}

/// First [`LABEL_CHARS`] characters of `title` followed by `...`.
#[must_use]
pub fn truncate_label(title: &str) -> String {
    let head: String = title.chars().take(LABEL_CHARS).collect();
    format!("{head}...")
}

/// The `limit` most-cited publications, descending.
///
/// Equal citation counts keep their input order.
#[must_use]
pub fn top_cited(publications: &[Work], limit: usize) -> Vec<CitationBar> {
    let mut bars: Vec<CitationBar> = publications.iter().map(CitationBar::from_work).collect();
    // sort_by is stable
    bars.sort_by(|a, b| b.citations.cmp(&a.citations));
    bars.truncate(limit);
    bars
}

/// Chart data for a ranked list of bars.
#[must_use]
pub fn chart_series(bars: &[CitationBar]) -> Vec<ChartPoint> {
    bars.iter()
        .map(|bar| ChartPoint { label: bar.label.clone(), value: bar.citations as f64 })
        .collect()
}
