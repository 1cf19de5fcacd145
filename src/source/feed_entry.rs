//! The entry type every feed source produces.
//!
//! `FeedEntry` is deliberately thin: the download pipeline only needs a
//! completion key and an enclosure URL.  Title and date ride along for log
//! output.

use chrono::{DateTime, Utc};

/// A single feed entry, normalised from RSS or Atom.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FeedEntry {
    /// Stable identifier from the feed (`<guid>` for RSS, `<id>` for Atom).
    ///
    /// `None` when the feed did not provide one or it was blank.
    pub id: Option<String>,

    /// Human-readable episode title, if any.
    pub title: Option<String>,

    /// URL of the first enclosure (the audio file).
    pub enclosure_url: Option<String>,

    /// Publication timestamp, if the feed gave a parseable one.
    pub published: Option<DateTime<Utc>>,
}

impl FeedEntry {
    /// The string recorded in history once this entry has been downloaded.
    ///
    /// Falls back to the enclosure URL for entries without an identifier so
    /// that they are still recorded and skipped on the next run.  Returns
    /// `None` only when there is neither.
    pub fn history_key(&self) -> Option<&str> {
        self.id.as_deref().or(self.enclosure_url.as_deref())
    }

    /// Title for log lines.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Option<&str>, enclosure: Option<&str>) -> FeedEntry {
        FeedEntry {
            id: id.map(String::from),
            enclosure_url: enclosure.map(String::from),
            ..FeedEntry::default()
        }
    }

    #[test]
    fn history_key_prefers_id() {
        let e = entry(Some("a1"), Some("http://x/ep1.mp3"));
        assert_eq!(e.history_key(), Some("a1"));
    }

    #[test]
    fn history_key_falls_back_to_enclosure() {
        let e = entry(None, Some("http://x/ep1.mp3"));
        assert_eq!(e.history_key(), Some("http://x/ep1.mp3"));
    }

    #[test]
    fn history_key_absent_without_id_or_enclosure() {
        assert_eq!(entry(None, None).history_key(), None);
    }

    #[test]
    fn label_defaults_when_untitled() {
        assert_eq!(entry(None, None).label(), "(untitled)");
    }
}
