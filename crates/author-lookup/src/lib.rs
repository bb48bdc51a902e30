//! Author Lookup
//!
//! Search the Crossref REST API for an author by name, disambiguate the
//! matching author mentions into candidate identities, and list a selected
//! candidate's publications with top-cited chart data.
//!
//! # Features
//!
//! - **Disambiguation**: mentions grouped by (given, family, primary affiliation)
//!   with per-candidate citations, venues, years and recent titles
//! - **Explicit session handoff**: the selected author moves between steps
//!   through a file slot (CLI) or a per-visitor slot (HTTP)
//! - **Two front ends**: a CLI and a JSON HTTP API for a browser UI
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use author_lookup::{AuthorLookup, Config, CrossrefClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CrossrefClient::new(Config::from_env()?)?;
//!     let lookup = AuthorLookup::new(Arc::new(client));
//!
//!     let candidates = lookup.find_candidates("Hopper").await?;
//!     if let Some(first) = candidates.first() {
//!         let result = lookup.publications(first).await?;
//!         println!("{} publications", result.publications.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod lookup;
pub mod models;
pub mod ranking;
pub mod server;
pub mod session;

pub use aggregate::aggregate_authors;
pub use client::CrossrefClient;
pub use config::Config;
pub use error::{ClientError, LookupError};
pub use lookup::{AuthorLookup, AuthorPublications};
pub use ranking::top_cited;
