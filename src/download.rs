//! Enclosure downloads.
//!
//! [`Downloader::fetch`] is the only place that writes into the download
//! folder.  The target file name comes from the last segment of the
//! enclosure URL; if that file already exists nothing happens at all.
//! Otherwise the body is streamed in [`CHUNK_SIZE`] pieces into a `.part`
//! file, which is renamed into place once complete.  Only then is the
//! identifier recorded in history, so a recorded identifier always has a
//! complete file behind it.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};
use url::Url;

use crate::error::{DownloadError, Error, HttpError};
use crate::history::HistoryStore;
use crate::http::HttpClient;

/// Bytes read from the network per chunk.  Nothing larger is ever buffered.
pub const CHUNK_SIZE: usize = 8192;

/// Suffix of the in-progress file next to the final target.
const PART_SUFFIX: &str = ".part";

/// What a call to [`Downloader::fetch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// A new file was written and its identifier recorded.
    Downloaded { path: PathBuf, bytes: u64 },
    /// A file with the target name was already there; no request was made
    /// and history was left alone.
    AlreadyPresent(PathBuf),
}

/// Streams enclosures into a folder and records them in history.
pub struct Downloader<'a, C: HttpClient + ?Sized> {
    client: &'a C,
    folder: &'a Path,
    history: &'a HistoryStore,
}

impl<'a, C: HttpClient + ?Sized> Downloader<'a, C> {
    pub fn new(client: &'a C, folder: &'a Path, history: &'a HistoryStore) -> Self {
        Self {
            client,
            folder,
            history,
        }
    }

    /// Download `url` unless its target file already exists, then record
    /// `identifier`.
    pub fn fetch(&self, url: &str, identifier: &str) -> Result<Fetched, Error> {
        let download_err = |source: DownloadError| Error::Download {
            url: url.to_string(),
            source,
        };

        let name = file_name_for(url).map_err(download_err)?;
        let target = self.folder.join(&name);
        if target.exists() {
            debug!(path = %target.display(), "file already present, skipping");
            return Ok(Fetched::AlreadyPresent(target));
        }

        info!("Downloading {url}");
        let bytes = self.stream_to(url, &target).map_err(download_err)?;
        info!(path = %target.display(), bytes, "download complete");

        self.history
            .record(identifier)
            .map_err(|source| Error::History {
                path: self.history.path().to_path_buf(),
                source,
            })?;

        Ok(Fetched::Downloaded {
            path: target,
            bytes,
        })
    }

    fn stream_to(&self, url: &str, target: &Path) -> Result<u64, DownloadError> {
        let mut body = self.client.get(url)?;

        let mut part_name = target.as_os_str().to_os_string();
        part_name.push(PART_SUFFIX);
        let part = PathBuf::from(part_name);

        let result = write_part(&mut body, &part).and_then(|bytes| {
            fs::rename(&part, target).map_err(DownloadError::Io)?;
            Ok(bytes)
        });
        if result.is_err() {
            if let Err(e) = fs::remove_file(&part) {
                debug!(path = %part.display(), error = %e, "could not remove partial file");
            }
        }
        result
    }
}

fn write_part(body: &mut dyn Read, part: &Path) -> Result<u64, DownloadError> {
    let mut file = File::create(part)?;
    let bytes = copy_chunked(body, &mut file)?;
    file.sync_all()?;
    Ok(bytes)
}

/// Copy `reader` into `writer` one [`CHUNK_SIZE`] buffer at a time.
///
/// Read errors are reported as HTTP body errors, write errors as disk
/// errors, so the caller can tell a dropped connection from a full disk.
fn copy_chunked(reader: &mut dyn Read, writer: &mut dyn Write) -> Result<u64, DownloadError> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(HttpError::Io(e).into()),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
        trace!(chunk = n, total, "wrote chunk");
    }
    writer.flush()?;
    Ok(total)
}

/// The local file name for an enclosure URL: the last path segment, as it
/// appears in the URL.
pub fn file_name_for(url: &str) -> Result<String, DownloadError> {
    let parsed = Url::parse(url)?;
    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    match segment {
        "" | "." | ".." => Err(DownloadError::NoFileName),
        name => Ok(name.to_string()),
    }
}
