// Blocking HTTP fetcher with retries and an optional disk cache

use crate::config::SourceConfig;
use crate::error::{IngestError, Result};
use crate::fetch::{DiskCache, Fetcher};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::{Client, Response};
use std::fs::File;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP client for all remote downloads
pub struct HttpFetcher {
    client: Client,
    config: SourceConfig,
    cache: Option<DiskCache>,
}

impl HttpFetcher {
    /// Create a fetcher, opening the configured cache directory
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate().map_err(IngestError::Validation)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        let cache = match &config.cache_dir {
            Some(dir) => Some(DiskCache::new(dir, config.cache_max_age_days)?),
            None => None,
        };

        Ok(HttpFetcher {
            client,
            config,
            cache,
        })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&DiskCache> {
        self.cache.as_ref()
    }

    /// Run one download attempt up to `max_retries` times, sleeping
    /// 2^attempt seconds in between
    fn with_retry<T>(&self, url: &str, mut attempt_once: impl FnMut() -> Result<T>) -> Result<T> {
        let mut last_error = None;

        for attempt in 1..=self.config.max_retries {
            match attempt_once() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "Download attempt {}/{} for {} failed: {}",
                        attempt, self.config.max_retries, url, e
                    );
                    last_error = Some(e);

                    if attempt < self.config.max_retries {
                        let backoff_secs = 2u64.pow(attempt);
                        info!("Retrying in {} seconds...", backoff_secs);
                        std::thread::sleep(Duration::from_secs(backoff_secs));
                    }
                },
            }
        }

        Err(last_error.unwrap_or_else(|| {
            IngestError::Validation(format!("No download attempt made for {}", url))
        }))
    }

    fn get(&self, url: &str) -> Result<Response> {
        debug!(url, "GET");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Wrap a response in a progress bar unless progress display is off
    fn with_progress(&self, response: Response, url: &str) -> Box<dyn Read + Send> {
        if !self.config.show_progress {
            return Box::new(response);
        }

        let pb = match response.content_length() {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(format!("Downloading {}", file_name(url)));

        Box::new(pb.wrap_read(response))
    }
}

impl Fetcher for HttpFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        let Some(cache) = &self.cache else {
            return self.with_retry(url, || Ok(self.with_progress(self.get(url)?, url)));
        };

        if let Some(path) = cache.lookup(url)? {
            debug!(url, path = %path.display(), "Serving from cache");
            return Ok(Box::new(File::open(path)?));
        }

        // A body cut off mid-transfer is retried as a whole
        self.with_retry(url, || {
            let mut body = self.with_progress(self.get(url)?, url);
            let path = cache.store(url, &mut body)?;
            Ok(Box::new(File::open(path)?) as Box<dyn Read + Send>)
        })
    }
}

fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
