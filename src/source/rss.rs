//! RSS / Atom feed source.
//!
//! The document is fetched through an [`HttpClient`] and then handed to
//! [`parse_feed`], a pure function that tries RSS 2.0 first and falls back to
//! Atom.

use std::io::Read;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{FeedEntry, FeedSource};
use crate::error::{FeedError, HttpError};
use crate::http::HttpClient;

/// A podcast feed reachable over HTTP.
pub struct RssSource<'a, C: HttpClient + ?Sized> {
    /// The feed URL.
    pub url: String,
    /// Short name used in log lines.
    pub label: String,
    client: &'a C,
}

impl<'a, C: HttpClient + ?Sized> RssSource<'a, C> {
    /// Create a new source for `url`, fetched through `client`.
    pub fn new(url: impl Into<String>, label: impl Into<String>, client: &'a C) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            client,
        }
    }
}

impl<C: HttpClient + ?Sized> FeedSource for RssSource<'_, C> {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        let mut body = Vec::new();
        self.client
            .get(&self.url)?
            .read_to_end(&mut body)
            .map_err(HttpError::Io)?;
        debug!(feed = %self.label, bytes = body.len(), "fetched feed document");
        parse_feed(&body)
    }
}

/// Parse a feed document into entries, preserving document order.
///
/// RSS 2.0 is tried first; if that fails the bytes are parsed as Atom.  The
/// error reports both parser messages when neither format fits.
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let rss_err = match ::rss::Channel::read_from(body) {
        Ok(channel) => return Ok(entries_from_rss(&channel)),
        Err(e) => e,
    };
    debug!(error = %rss_err, "not an RSS document, trying Atom");

    match atom_syndication::Feed::read_from(body) {
        Ok(feed) => Ok(entries_from_atom(&feed)),
        Err(atom_err) => Err(FeedError::Parse {
            rss: rss_err.to_string(),
            atom: atom_err.to_string(),
        }),
    }
}

fn entries_from_rss(channel: &::rss::Channel) -> Vec<FeedEntry> {
    channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            id: item.guid().and_then(|g| single_line(g.value())),
            title: item.title().and_then(non_blank),
            enclosure_url: item.enclosure().and_then(|enc| non_blank(enc.url())),
            // Unparseable dates degrade to None rather than failing the feed.
            published: item
                .pub_date()
                .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        })
        .collect()
}

fn entries_from_atom(feed: &atom_syndication::Feed) -> Vec<FeedEntry> {
    feed.entries()
        .iter()
        .map(|entry| FeedEntry {
            id: single_line(entry.id()),
            title: non_blank(entry.title().as_str()),
            enclosure_url: entry
                .links()
                .iter()
                .find(|link| link.rel() == "enclosure")
                .and_then(|link| non_blank(link.href())),
            published: Some(
                entry
                    .published()
                    .unwrap_or(entry.updated())
                    .with_timezone(&Utc),
            ),
        })
        .collect()
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Identifiers end up as lines in the history file, so any run of
/// whitespace inside one (line breaks included) becomes a single space.
fn single_line(s: &str) -> Option<String> {
    let joined = s.split_whitespace().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
