//! Error types.
//!
//! Each stage of a run has its own error enum so the top-level [`Error`] can
//! tell the caller *where* the run failed.  [`Error::exit_code`] turns that
//! into the process exit status.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a feed that could not be fetched or parsed.
pub const EXIT_FEED: u8 = 1;
/// Exit status for a failed enclosure download (network or disk).
pub const EXIT_DOWNLOAD: u8 = 3;
/// Exit status for an unreadable or unwritable history file.
pub const EXIT_HISTORY: u8 = 4;
/// Exit status for anything that goes wrong before the run starts.
pub const EXIT_STARTUP: u8 = 5;

/// A single HTTP GET that did not produce a usable body.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("reading response body: {0}")]
    Io(#[from] io::Error),
}

/// The feed was unreachable or unparsable.  Always fatal.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("fetching feed: {0}")]
    Http(#[from] HttpError),

    #[error("document is neither RSS ({rss}) nor Atom ({atom})")]
    Parse { rss: String, atom: String },
}

/// One enclosure could not be downloaded.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("writing file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid enclosure URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no file name in URL path")]
    NoFileName,
}

/// Top-level error for a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("cannot create download folder {}: {source}", path.display())]
    DownloadFolder { path: PathBuf, source: io::Error },

    #[error("download of {url} failed: {source}")]
    Download { url: String, source: DownloadError },

    #[error("history file {}: {source}", path.display())]
    History { path: PathBuf, source: io::Error },

    /// Downloads failed under `--keep-going`; each one was already logged.
    #[error("{0} download(s) failed")]
    DownloadsFailed(usize),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Feed(_) => EXIT_FEED,
            Error::DownloadFolder { .. } | Error::Download { .. } | Error::DownloadsFailed(_) => {
                EXIT_DOWNLOAD
            }
            Error::History { .. } => EXIT_HISTORY,
        }
    }

    /// Whether `--keep-going` may skip past this error and continue with the
    /// next entry.
    pub fn is_per_entry(&self) -> bool {
        matches!(self, Error::Download { .. })
    }
}
