//! HTTP fetch of the scraped page.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, info_span};

/// User agent string for page requests.
pub const USER_AGENT_VALUE: &str = concat!("exitlist/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the public exit list page.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self { client })
    }

    /// Downloads `url` and returns the body bytes.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, timeouts and non-success statuses.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let span = info_span!("fetch", url = %url);
        let _guard = span.enter();
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "text/html")
            .send()
            .with_context(|| format!("fetch {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("fetch {url}: HTTP {status}");
        }
        let body = response
            .bytes()
            .with_context(|| format!("read body of {url}"))?;

        debug!(
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis(),
            "fetched page"
        );
        Ok(body.to_vec())
    }
}
