//! The network seam.
//!
//! Both the feed fetch and the enclosure downloads go through
//! [`HttpClient`], so tests can swap in a client that never touches the
//! network and can count how many requests a run made.

use std::io::Read;
use std::time::Duration;

use crate::error::HttpError;

/// Anything that can perform a GET and hand back a streaming body.
pub trait HttpClient {
    /// Issue a GET for `url`.
    ///
    /// The returned reader yields the response body as it arrives; callers
    /// decide how much of it to hold in memory.  Non-success statuses are
    /// reported as [`HttpError::Status`] without reading the body.
    fn get(&self, url: &str) -> Result<Box<dyn Read>, HttpError>;
}

/// [`HttpClient`] backed by a blocking [`reqwest`] client.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Build a client.  `timeout` bounds each whole request (connect plus
    /// body); `None` waits forever.
    pub fn new(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Box<dyn Read>, HttpError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(Box::new(response))
    }
}
