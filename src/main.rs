//! podfetch — download new podcast episodes from an RSS or Atom feed.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ entries ┌──────────┐ url, key ┌─────────────┐ record ┌────────────┐
//! │ source/   │ ──────► │  run.rs  │ ───────► │ download.rs │ ─────► │ history.rs │
//! │ (RSS/Atom)│         │ (decide) │          │ (stream)    │        │ (append)   │
//! └───────────┘         └──────────┘          └─────────────┘        └────────────┘
//!       │                     ▲                      │
//!       └──── http.rs ────────┼──────────────────────┘
//!                             │ load once
//!                        history.rs
//! ```
//!
//! * **`source/`** — the `FeedSource` trait and the RSS/Atom implementation.
//! * **`http`** — the `HttpClient` seam shared by feed fetch and downloads.
//! * **`history`** — the append-only file of finished identifiers.
//! * **`download`** — turns one enclosure URL into one complete file.
//! * **`run`** — a single sequential pass over the feed.
//! * **`main`** — wires everything together and maps errors to exit codes.
//!
//! One invocation is one pass.  Run it from a timer or cron to poll.

mod config;
mod download;
mod error;
mod history;
mod http;
mod logging;
mod run;
mod source;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use config::Config;
use error::{Error, EXIT_STARTUP};
use http::ReqwestClient;
use run::RunSummary;
use source::RssSource;

fn main() -> ExitCode {
    let config = Config::parse();
    logging::configure_logging(config.verbose);

    match try_main(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = err
                .downcast_ref::<Error>()
                .map_or(EXIT_STARTUP, Error::exit_code);
            ExitCode::from(code)
        }
    }
}

fn try_main(config: &Config) -> Result<RunSummary> {
    let client = ReqwestClient::new(config.timeout()).context("building HTTP client")?;
    let source = RssSource::new(&config.feed_url, "feed", &client);
    Ok(run::run(config, &source, &client)?)
}
