//! Feed source abstraction.
//!
//! This module defines the [`FeedSource`] trait and the [`FeedEntry`] type
//! it yields.  The only concrete source is [`RssSource`], which understands
//! both RSS 2.0 and Atom documents.
//!
//! ## Adding a new source
//!
//! 1. Create a new file in this directory (e.g. `json_feed.rs`).
//! 2. Define a struct and implement [`FeedSource`] for it.
//! 3. Add `mod json_feed;` below and re-export the struct.
//! 4. Construct it in `main.rs` instead of `RssSource`.
//!
//! The run loop only ever sees `FeedEntry` values, so nothing else changes.

mod feed_entry;
mod rss;

pub use feed_entry::FeedEntry;
pub use self::rss::RssSource;

use crate::error::FeedError;

/// Something that can produce the current list of feed entries.
///
/// [`fetch()`](FeedSource::fetch) is called exactly once per run, before any
/// download starts.  Entries must come back in feed order.
pub trait FeedSource {
    /// Human-readable label for log lines.
    fn name(&self) -> &str;

    /// Fetch and parse the feed.
    fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError>;
}
