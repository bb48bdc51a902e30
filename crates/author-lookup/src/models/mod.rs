//! Data models for Crossref entities and aggregated authors.
//!
//! Wire models use `#[serde(default)]` for every field and
//! `#[serde(rename_all = "kebab-case")]` to match Crossref naming.

mod author;
mod enums;
mod work;

pub use author::{Affiliation, AuthorMention, AuthorSummary};
pub use enums::ResponseFormat;
pub use work::{DateParts, Envelope, Timestamp, Work, WorkList};
