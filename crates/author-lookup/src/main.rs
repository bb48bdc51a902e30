//! Author lookup - Entry Point
//!
//! CLI for the search → select → publications flow, plus an HTTP mode for a
//! browser front end.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use author_lookup::error::{LookupError, LookupResult};
use author_lookup::formatters;
use author_lookup::models::ResponseFormat;
use author_lookup::server::HttpServer;
use author_lookup::session::FileSession;
use author_lookup::{AuthorLookup, Config, CrossrefClient};

#[derive(Parser, Debug)]
#[command(name = "author-lookup")]
#[command(about = "Find an author on Crossref and list their publications")]
#[command(version)]
struct Cli {
    /// Crossref API base URL (for mirrors and mock servers)
    #[arg(long, env = "CROSSREF_API_URL")]
    api_url: Option<String>,

    /// Contact address sent as `mailto` (Crossref polite pool)
    #[arg(long, env = "CROSSREF_MAILTO")]
    mailto: Option<String>,

    /// File holding the selected author between `search --select` and `publications`
    #[arg(long, env = "AUTHOR_LOOKUP_SESSION")]
    session_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for an author by name and list candidate identities
    Search {
        /// Author name or name fragment
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Select candidate N (1-based) for the `publications` step
        #[arg(long)]
        select: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: ResponseFormat,
    },

    /// List publications of the selected author with the top-cited chart data
    Publications {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: ResponseFormat,
    },

    /// Show details of a single work
    Work {
        /// DOI (bare, `doi:` or https://doi.org/ form)
        doi: String,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: ResponseFormat,
    },

    /// Serve the JSON API for a browser front end
    Serve {
        /// HTTP server port
        #[arg(long, default_value = "8000", env = "PORT")]
        port: u16,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::new(cli.mailto.clone().filter(|m| !m.trim().is_empty()));
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = &cli.session_file {
        config.session_file.clone_from(path);
    }
    Ok(config)
}

fn render(
    format: ResponseFormat,
    markdown: String,
    json: &serde_json::Value,
) -> LookupResult<String> {
    if format.is_json() {
        return Ok(serde_json::to_string_pretty(json)?);
    }
    Ok(markdown)
}

async fn run(command: Command, lookup: AuthorLookup, session: &FileSession) -> anyhow::Result<()> {
    match command {
        Command::Search { name, select, format } => {
            let name = name.join(" ");
            let authors = lookup.find_candidates(&name).await?;

            if let Some(n) = select {
                let chosen = n
                    .checked_sub(1)
                    .and_then(|i| authors.get(i))
                    .ok_or_else(|| {
                        LookupError::invalid_argument(
                            "select",
                            format!("must be between 1 and {}", authors.len()),
                        )
                    })?;
                session.write(chosen)?;
                eprintln!(
                    "Selected {}. Run `author-lookup publications` to view the publication history.",
                    chosen.full_name()
                );
            }

            let output = render(
                format,
                formatters::format_candidates_markdown(&authors),
                &formatters::candidates_json(&authors),
            )?;
            println!("{output}");
        }
        Command::Publications { format } => {
            let author = session.read()?;
            let result = lookup.publications(&author).await?;
            let output = render(
                format,
                formatters::format_publications_markdown(&result),
                &formatters::publications_json(&result),
            )?;
            println!("{output}");
        }
        Command::Work { doi, format } => {
            let work = lookup.work(&doi).await?;
            let output = render(
                format,
                formatters::format_work_markdown(&work),
                &formatters::compact_work(&work),
            )?;
            println!("{output}");
        }
        Command::Serve { port } => {
            HttpServer::new(lookup).run(port).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        command = ?cli.command,
        "Starting author-lookup"
    );

    let config = build_config(&cli)?;
    let session = FileSession::new(config.session_file.clone());
    let lookup = AuthorLookup::new(Arc::new(CrossrefClient::new(config)?));

    match run(cli.command, lookup, &session).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<LookupError>() {
            Some(lookup_err) => {
                tracing::debug!(error = %lookup_err, "Command failed");
                eprintln!("{}", lookup_err.to_user_message());
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}
