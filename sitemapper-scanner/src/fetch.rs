use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::LAST_MODIFIED;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Pages announcing a larger `Content-Length` are not downloaded.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

/// Sites behind user-agent sniffing serve crawlers a different page, so we
/// present ourselves as a desktop browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// What came back from one fetch. A missing body means the page could not be
/// retrieved, for whatever reason. A present body is already decoded text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    pub body: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl FetchOutcome {
    pub fn failed() -> Self {
        Self::default()
    }

    pub fn page(body: impl Into<String>, last_modified: Option<DateTime<Utc>>) -> Self {
        Self {
            body: Some(body.into()),
            last_modified,
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Never errors: every failure collapses into [`FetchOutcome::failed`].
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

pub struct HttpFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            // self-signed certificates are common on staging sites
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        debug!("Fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                return FetchOutcome::failed();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Fetch failed for {}: HTTP {}", url, status);
            return FetchOutcome::failed();
        }

        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_http_date);

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes {
                warn!(
                    "Skipping {}: body is {} bytes, limit is {}",
                    url, length, self.max_body_bytes
                );
                return FetchOutcome::failed();
            }
        }

        // decodes with the Content-Type charset, UTF-8 when none is given
        match response.text().await {
            Ok(body) => FetchOutcome::page(body, last_modified),
            Err(e) => {
                warn!("Reading body of {} failed: {}", url, e);
                FetchOutcome::failed()
            }
        }
    }
}

/// Parses a `Last-Modified` header value (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
