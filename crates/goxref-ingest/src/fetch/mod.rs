//! Remote data access
//!
//! Every download goes through a [`Fetcher`]. Implementors only provide
//! [`Fetcher::open`], a reader over the raw response body; the provided
//! methods take care of gzip decoding and of splitting large bodies into
//! lines lazily, so a multi-gigabyte mapping table is never held in memory.
//!
//! - [`HttpFetcher`]: blocking HTTP client with retries and a disk cache
//! - [`StaticFetcher`]: fixed bodies by URL, for tests and offline use

pub mod cache;
pub mod http;

pub use cache::DiskCache;
pub use http::HttpFetcher;

use crate::error::{IngestError, Result};
use flate2::read::MultiGzDecoder;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Cursor, Read};

/// Source of raw response bodies
pub trait Fetcher {
    /// Open the raw (possibly compressed) body behind `url`
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>>;

    /// Whole body as text, gunzipped when the URL ends in `.gz`
    fn fetch_text(&self, url: &str) -> Result<String> {
        let mut reader = decoded(self.open(url)?, url);
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Body as a lazy line iterator, gunzipped when the URL ends in `.gz`
    fn fetch_lines(&self, url: &str) -> Result<LineStream> {
        Ok(LineStream::new(decoded(self.open(url)?, url)))
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        (**self).open(url)
    }
}

/// Wrap a raw body in a buffered, decompressing reader where needed
fn decoded(raw: Box<dyn Read + Send>, url: &str) -> Box<dyn BufRead + Send> {
    if is_gzip_url(url) {
        Box::new(BufReader::new(MultiGzDecoder::new(raw)))
    } else {
        Box::new(BufReader::new(raw))
    }
}

fn is_gzip_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.ends_with(".gz")
}

// ============================================================================
// Line stream
// ============================================================================

/// Lines of a response body, read on demand
///
/// Line terminators (`\n` or `\r\n`) are stripped.
pub struct LineStream {
    lines: std::io::Lines<Box<dyn BufRead + Send>>,
}

impl LineStream {
    pub fn new(reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Stream over an in-memory body
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(Box::new(Cursor::new(text.into().into_bytes())))
    }
}

impl Iterator for LineStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|line| line.map_err(IngestError::from))
    }
}

// ============================================================================
// Static fetcher
// ============================================================================

/// Serves fixed bodies by URL
///
/// Bodies for `.gz` URLs must themselves be gzip-compressed.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.bodies.insert(url.into(), body.into());
    }
}

impl Fetcher for StaticFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        let body = self
            .bodies
            .get(url)
            .ok_or_else(|| IngestError::NotFound(url.to_string()))?;
        Ok(Box::new(Cursor::new(body.clone())))
    }
}

// ============================================================================
// Tests
// ============================================================================
