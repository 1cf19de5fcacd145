//! One check-and-download pass over the feed.
//!
//! The pass is strictly sequential: make sure the download folder exists,
//! load history once, fetch the feed once, then walk the entries in feed
//! order and download each new enclosure before looking at the next entry.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::download::{Downloader, Fetched};
use crate::error::Error;
use crate::history::HistoryStore;
use crate::http::HttpClient;
use crate::source::{FeedEntry, FeedSource};

/// What happened during a pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Files written during this pass, in download order.
    pub downloaded: Vec<PathBuf>,
    /// Total bytes written for `downloaded`.
    pub bytes: u64,
    /// New entries whose target file already existed.
    pub already_present: usize,
    /// Entries whose identifier was already in history.
    pub skipped_known: usize,
    /// Entries without an enclosure.
    pub skipped_no_enclosure: usize,
    /// Downloads that failed under `--keep-going`.
    pub failed: usize,
}

/// What to do with a single feed entry.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision<'e> {
    NoEnclosure,
    AlreadyRecorded,
    Fetch { url: &'e str, key: &'e str },
}

/// Decide what a feed entry needs, given the identifiers already recorded.
pub fn decide<'e>(entry: &'e FeedEntry, known: &HashSet<String>) -> Decision<'e> {
    let Some(url) = entry.enclosure_url.as_deref() else {
        return Decision::NoEnclosure;
    };
    // An entry with an enclosure always has a key: the id or the URL itself.
    let key = entry.history_key().unwrap_or(url);
    if known.contains(key) {
        Decision::AlreadyRecorded
    } else {
        Decision::Fetch { url, key }
    }
}

/// Run one pass.
///
/// Any error aborts the pass, except that with `keep_going` set a failed
/// download is logged and counted and the pass moves on.  In that case the
/// pass still ends in [`Error::DownloadsFailed`] so the exit status reflects
/// the failure.
pub fn run<C: HttpClient + ?Sized>(
    config: &Config,
    source: &dyn FeedSource,
    client: &C,
) -> Result<RunSummary, Error> {
    fs::create_dir_all(&config.download_folder).map_err(|source| Error::DownloadFolder {
        path: config.download_folder.clone(),
        source,
    })?;

    let history = HistoryStore::new(&config.history_file);
    let mut known = history.load().map_err(|source| Error::History {
        path: config.history_file.clone(),
        source,
    })?;

    let entries = source.fetch()?;
    info!(feed = source.name(), entries = entries.len(), "fetched feed");

    let downloader = Downloader::new(client, &config.download_folder, &history);
    let mut summary = RunSummary::default();

    for entry in &entries {
        let (url, key) = match decide(entry, &known) {
            Decision::NoEnclosure => {
                debug!(entry = entry.label(), "no enclosure, skipping");
                summary.skipped_no_enclosure += 1;
                continue;
            }
            Decision::AlreadyRecorded => {
                debug!(entry = entry.label(), "already downloaded, skipping");
                summary.skipped_known += 1;
                continue;
            }
            Decision::Fetch { url, key } => (url, key),
        };

        if let Some(published) = entry.published {
            debug!(entry = entry.label(), %published, "new episode");
        }

        match downloader.fetch(url, key) {
            Ok(Fetched::Downloaded { path, bytes }) => {
                known.insert(key.to_string());
                summary.downloaded.push(path);
                summary.bytes += bytes;
            }
            Ok(Fetched::AlreadyPresent(_)) => summary.already_present += 1,
            Err(err) if config.keep_going && err.is_per_entry() => {
                warn!(entry = entry.label(), "{err}");
                summary.failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        downloaded = summary.downloaded.len(),
        bytes = summary.bytes,
        already_present = summary.already_present,
        skipped_known = summary.skipped_known,
        skipped_no_enclosure = summary.skipped_no_enclosure,
        failed = summary.failed,
        "run finished"
    );

    if summary.failed > 0 {
        return Err(Error::DownloadsFailed(summary.failed));
    }
    Ok(summary)
}
