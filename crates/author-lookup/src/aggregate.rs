//! Author disambiguation: reduce a page of works to candidate identities.
//!
//! Every author mention whose name contains the search term (case-insensitive
//! substring over `given family`, `family given`, `given`, `family`) is folded
//! into the candidate keyed by `(given, family, primary affiliation)`.
//! Candidates come out in the order they were first seen.
//!
//! The matching is deliberately permissive: "lee" matches "Leeson". Two
//! homonyms with no affiliation collapse into one candidate.

use std::collections::{BTreeSet, HashMap};

use crate::error::{LookupError, LookupResult};
use crate::models::{Affiliation, AuthorMention, AuthorSummary, Work};

/// Recent titles kept per candidate.
pub const MAX_RECENT_PUBLICATIONS: usize = 3;

/// Aggregation key for one author identity.
///
/// Case-sensitive on the stored strings; only surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    given: String,
    family: String,
    affiliation: String,
}

impl IdentityKey {
    /// Derive the key for a mention.
    #[must_use]
    pub fn of(mention: &AuthorMention) -> Self {
        Self {
            given: mention.given().trim().to_string(),
            family: mention.family().trim().to_string(),
            affiliation: mention.primary_affiliation().unwrap_or_default().trim().to_string(),
        }
    }
}

/// Lowercased, trimmed search term.
#[derive(Debug, Clone)]
pub struct NameQuery(String);

impl NameQuery {
    /// Validate and normalize a raw search term.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidArgument`] if the term is blank.
    pub fn new(raw: &str) -> LookupResult<Self> {
        let term = raw.trim().to_lowercase();
        if term.is_empty() {
            return Err(LookupError::invalid_argument("search_term", "cannot be empty"));
        }
        Ok(Self(term))
    }

    /// Whether the mention's name contains the term in any arrangement.
    #[must_use]
    pub fn matches(&self, mention: &AuthorMention) -> bool {
        let given = mention.given().to_lowercase();
        let family = mention.family().to_lowercase();
        let full = format!("{given} {family}");
        let reversed = format!("{family} {given}");

        [full.trim(), reversed.trim(), given.as_str(), family.as_str()]
            .iter()
            .any(|candidate| candidate.contains(self.0.as_str()))
    }

    /// The normalized term.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Working state for one identity during a pass.
#[derive(Debug)]
struct Accumulator {
    given: String,
    family: String,
    orcid: Option<String>,
    affiliation: Vec<Affiliation>,
    recent_publications: Vec<String>,
    venues: Vec<String>,
    years: BTreeSet<i32>,
    total_publications: u32,
    citation_count: u64,
}

impl Accumulator {
    fn new(mention: &AuthorMention) -> Self {
        Self {
            given: mention.given().to_string(),
            family: mention.family().to_string(),
            orcid: mention.orcid.clone(),
            affiliation: mention.affiliation.clone(),
            recent_publications: Vec::with_capacity(MAX_RECENT_PUBLICATIONS),
            venues: Vec::new(),
            years: BTreeSet::new(),
            total_publications: 0,
            citation_count: 0,
        }
    }

    fn record(&mut self, work: &Work) {
        self.total_publications += 1;

        if let Some(year) = work.print_year() {
            self.years.insert(year);
        }

        if self.recent_publications.len() < MAX_RECENT_PUBLICATIONS {
            self.recent_publications.push(work.title().unwrap_or_default().to_string());
        }

        if let Some(venue) = work.venue() {
            if !self.venues.iter().any(|v| v == venue) {
                self.venues.push(venue.to_string());
            }
        }

        self.citation_count += work.citations();
    }

    fn finish(self) -> AuthorSummary {
        AuthorSummary {
            average_citations_per_paper: average_citations(
                self.citation_count,
                self.total_publications,
            ),
            given: self.given,
            family: self.family,
            orcid: self.orcid,
            affiliation: self.affiliation,
            recent_publications: self.recent_publications,
            recent_venues: self.venues,
            year_range: self.years.into_iter().collect(),
            total_publications: self.total_publications,
            citation_count: self.citation_count,
        }
    }
}

/// Citations per paper rounded to two decimal places; 0 when there are no papers.
#[must_use]
pub fn average_citations(citations: u64, publications: u32) -> f64 {
    if publications == 0 {
        return 0.0;
    }
    let avg = citations as f64 / publications as f64;
    (avg * 100.0).round() / 100.0
}

/// Group the matching author mentions of `records` into candidate summaries.
///
/// Output order is first appearance while scanning records (and their author
/// lists) top to bottom. Records without an author list, title, venue or
/// citation count contribute neutral defaults.
///
/// # Errors
///
/// Returns [`LookupError::InvalidArgument`] if `search_term` is blank.
pub fn aggregate_authors(records: &[Work], search_term: &str) -> LookupResult<Vec<AuthorSummary>> {
    let query = NameQuery::new(search_term)?;

    let mut index: HashMap<IdentityKey, usize> = HashMap::new();
    let mut candidates: Vec<Accumulator> = Vec::new();

    for work in records {
        for mention in work.authors() {
            if !query.matches(mention) {
                continue;
            }

            let slot = *index.entry(IdentityKey::of(mention)).or_insert_with(|| {
                candidates.push(Accumulator::new(mention));
                candidates.len() - 1
            });
            candidates[slot].record(work);
        }
    }

    tracing::debug!(
        term = query.as_str(),
        records = records.len(),
        candidates = candidates.len(),
        "Aggregated author candidates"
    );

    Ok(candidates.into_iter().map(Accumulator::finish).collect())
}
