//! In-memory [`Fetch`] for tests.
//!
//! Responses are registered per URL up front; anything unregistered answers
//! with HTTP 404. Every request is recorded, so tests can assert exactly
//! which URLs were hit and how often.

use crate::fetch::Fetch;
use async_trait::async_trait;
use comicpull_model::{PullError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Canned {
    Body(Vec<u8>),
    Status(u16),
}

#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.responses
            .insert(url.to_string(), Canned::Body(html.as_bytes().to_vec()));
        self
    }

    pub fn with_bytes(mut self, url: &str, bytes: &[u8]) -> Self {
        self.responses
            .insert(url.to_string(), Canned::Body(bytes.to_vec()));
        self
    }

    /// Answer `url` with a non-success status.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Canned::Status(status));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    fn respond(&self, url: &str) -> Result<Vec<u8>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        match self.responses.get(url) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(PullError::fetch(url, format!("HTTP {status}"))),
            None => Err(PullError::fetch(url, "HTTP 404 Not Found")),
        }
    }
}

#[async_trait]
impl Fetch for StaticFetcher {
    async fn get_text(&self, url: &str) -> Result<String> {
        let body = self.respond(url)?;
        String::from_utf8(body).map_err(|e| PullError::fetch(url, format!("body is not UTF-8: {e}")))
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.respond(url)
    }
}
