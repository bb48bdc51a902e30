//! Markdown output formatting.

use chrono::{DateTime, Utc};

use crate::lookup::AuthorPublications;
use crate::models::{AuthorSummary, Work};
use crate::ranking::CitationBar;

/// Shown instead of a candidate list when nothing matched.
pub const NO_AUTHORS_FOUND: &str = "No authors found matching your search criteria.";

/// Venues listed per candidate.
const VENUES_SHOWN: usize = 2;

/// Date as shown in publication lists ("Jan 5, 2020").
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format the candidate list, numbered from 1 for selection.
#[must_use]
pub fn format_candidates_markdown(authors: &[AuthorSummary]) -> String {
    if authors.is_empty() {
        return NO_AUTHORS_FOUND.to_string();
    }

    let mut output = format!(
        "# Found {} potential matches. Please select the correct author:\n\n",
        authors.len()
    );

    for (i, author) in authors.iter().enumerate() {
        output.push_str(&format_candidate_markdown(author, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single candidate card.
#[must_use]
pub fn format_candidate_markdown(author: &AuthorSummary, index: usize) -> String {
    let mut output = format!("## {}. {}\n\n", index, author.full_name());

    if let Some(orcid) = &author.orcid {
        output.push_str(&format!("**ORCID**: [ORCID Profile]({orcid})\n\n"));
    }

    if let Some(affiliation) = author.primary_affiliation() {
        output.push_str(&format!("**Affiliation**: {affiliation}\n\n"));
    }

    let metrics = [
        format!("**Publication Period**: {}", author.publication_period()),
        format!("**Total Publications**: {}", author.total_publications),
        format!("**Total Citations**: {}", author.citation_count),
        format!("**Avg Citations**: {:.2}", author.average_citations_per_paper),
    ];
    output.push_str(&format!("{}\n\n", metrics.join(" | ")));

    if !author.recent_venues.is_empty() {
        let venues: Vec<&str> =
            author.recent_venues.iter().take(VENUES_SHOWN).map(String::as_str).collect();
        output.push_str(&format!("**Recent Venues**: {}\n\n", venues.join(", ")));
    }

    if let Some(title) = author.recent_publications.first().filter(|t| !t.is_empty()) {
        output.push_str(&format!("**Recent Publication**: {title}\n"));
    }

    output
}

/// Format a publication list followed by the top-cited table.
#[must_use]
pub fn format_publications_markdown(result: &AuthorPublications) -> String {
    let name = result.author.full_name();

    if result.publications.is_empty() {
        return format!("No publications found for {name}.");
    }

    let mut output = format!("# {} ({} publications)\n\n", name, result.publications.len());

    for work in &result.publications {
        output.push_str(&format_publication_markdown(work));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_top_cited_markdown(&result.top_cited));
    output
}

/// Format one publication as a list entry.
#[must_use]
pub fn format_publication_markdown(work: &Work) -> String {
    let mut meta = Vec::new();
    if let Some(created) = work.created_at() {
        meta.push(format!("Published: {}", format_date(&created)));
    }
    meta.push(format!("Citations: {}", work.citations()));
    if let (Some(doi), Some(url)) = (work.doi(), work.doi_url()) {
        meta.push(format!("[DOI: {doi}]({url})"));
    }

    format!("- **{}**\n  {}", work.title_or_default(), meta.join(" | "))
}

/// Format the chart data as a Markdown table.
#[must_use]
pub fn format_top_cited_markdown(bars: &[CitationBar]) -> String {
    let mut output = String::from("## Top 10 Most Cited Publications\n\n");

    if bars.is_empty() {
        output.push_str("No citation data.\n");
        return output;
    }

    output.push_str("| # | Publication | Citations |\n|---|---|---|\n");
    for (i, bar) in bars.iter().enumerate() {
        output.push_str(&format!("| {} | {} | {} |\n", i + 1, bar.label, bar.citations));
    }
    output
}

/// Format the detail view of a single work.
#[must_use]
pub fn format_work_markdown(work: &Work) -> String {
    let published = work
        .created_at()
        .map(|d| d.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|| "No date available".to_string());

    let mut output = String::from("## Paper Details\n\n");
    output.push_str(&format!("**Title**: {}\n\n", work.title_or_default()));
    output.push_str(&format!("**DOI**: {}\n\n", work.doi().unwrap_or("No DOI available")));
    output.push_str(&format!("**Citations**: {}\n\n", work.citations()));
    output.push_str(&format!("**Published Date**: {published}\n"));

    if let Some(venue) = work.venue() {
        output.push_str(&format!("\n**Venue**: {venue}\n"));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = DateTime::parse_from_rfc3339("2020-01-05T10:00:00Z").unwrap().to_utc();
        assert_eq!(format_date(&date), "Jan 5, 2020");
    }

    #[test]
    fn test_empty_candidates() {
        assert_eq!(format_candidates_markdown(&[]), NO_AUTHORS_FOUND);
    }

    #[test]
    fn test_work_without_fields() {
        let output = format_work_markdown(&Work::default());
        assert!(output.contains("No title available"));
        assert!(output.contains("No DOI available"));
        assert!(output.contains("No date available"));
    }
}
