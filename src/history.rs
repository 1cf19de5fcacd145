//! Download history.
//!
//! A plain text file with one identifier per line.  It is read once at
//! startup and only ever appended to afterwards; duplicates are harmless
//! because [`HistoryStore::load`] collapses them into a set.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Append-only set of identifiers that have been fully downloaded.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every recorded identifier.  A missing file is an empty history.
    pub fn load(&self) -> io::Result<HashSet<String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file yet");
                return Ok(HashSet::new());
            }
            Err(e) => return Err(e),
        };

        let known: HashSet<String> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        debug!(path = %self.path.display(), entries = known.len(), "loaded history");
        Ok(known)
    }

    /// Append `identifier` as a new line.
    ///
    /// The file is created on first use.  Identifiers containing a line
    /// break are refused since they would read back as two entries.
    pub fn record(&self, identifier: &str) -> io::Result<()> {
        if identifier.contains(['\n', '\r']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "identifier contains a line break",
            ));
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{identifier}")?;
        file.flush()
    }
}
