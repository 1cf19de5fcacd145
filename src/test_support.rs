//! Shared helpers for unit tests: a network-free [`HttpClient`] and a few
//! fixtures.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::Path;
use std::rc::Rc;

use crate::config::Config;
use crate::error::HttpError;
use crate::http::HttpClient;

/// An [`HttpClient`] that serves canned bodies and records every request.
///
/// Unknown URLs answer 404.  Bodies are handed out `read_size` bytes per
/// `read()` call at most, and the largest buffer any reader was asked to
/// fill is remembered in [`MockHttp::largest_read`].
#[derive(Default)]
pub struct MockHttp {
    bodies: HashMap<String, Vec<u8>>,
    failing: HashMap<String, usize>,
    requests: RefCell<Vec<String>>,
    read_size: Option<usize>,
    largest_read: Rc<Cell<usize>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl AsRef<[u8]>) -> Self {
        self.bodies.insert(url.to_string(), body.as_ref().to_vec());
        self
    }

    /// Serve `body` for `url` but fail with an I/O error once `after` bytes
    /// have been read.
    pub fn with_broken_body(mut self, url: &str, body: impl AsRef<[u8]>, after: usize) -> Self {
        self.failing.insert(url.to_string(), after);
        self.with_body(url, body)
    }

    pub fn with_read_size(mut self, read_size: usize) -> Self {
        self.read_size = Some(read_size);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn largest_read(&self) -> usize {
        self.largest_read.get()
    }
}

impl HttpClient for MockHttp {
    fn get(&self, url: &str) -> Result<Box<dyn Read>, HttpError> {
        self.requests.borrow_mut().push(url.to_string());
        let data = self.bodies.get(url).cloned().ok_or_else(|| HttpError::Status {
            url: url.to_string(),
            status: 404,
        })?;
        Ok(Box::new(MockBody {
            data,
            pos: 0,
            read_size: self.read_size,
            fail_after: self.failing.get(url).copied(),
            largest_read: Rc::clone(&self.largest_read),
        }))
    }
}

struct MockBody {
    data: Vec<u8>,
    pos: usize,
    read_size: Option<usize>,
    fail_after: Option<usize>,
    largest_read: Rc<Cell<usize>>,
}

impl Read for MockBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.largest_read.set(self.largest_read.get().max(buf.len()));
        if self.fail_after.is_some_and(|after| self.pos >= after) {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        let remaining = &self.data[self.pos..];
        let mut n = remaining.len().min(buf.len());
        if let Some(size) = self.read_size {
            n = n.min(size);
        }
        if let Some(after) = self.fail_after {
            n = n.min(after - self.pos);
        }
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// A config pointing at a fresh feed URL inside `dir`.
pub fn config_in(dir: &Path, feed_url: &str) -> Config {
    Config {
        feed_url: feed_url.to_string(),
        download_folder: dir.join("downloads"),
        history_file: dir.join("downloaded.txt"),
        timeout: None,
        keep_going: false,
        verbose: 0,
    }
}

/// An RSS document with one `<item>` per `(guid, enclosure)` pair.
pub fn rss_feed(items: &[(&str, Option<&str>)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?>\n<rss version=\"2.0\"><channel><title>Test</title>\n",
    );
    for (guid, enclosure) in items {
        xml.push_str("<item><guid>");
        xml.push_str(guid);
        xml.push_str("</guid>");
        if let Some(url) = enclosure {
            xml.push_str(&format!(
                "<enclosure url=\"{url}\" length=\"0\" type=\"audio/mpeg\"/>"
            ));
        }
        xml.push_str("</item>\n");
    }
    xml.push_str("</channel></rss>\n");
    xml
}
