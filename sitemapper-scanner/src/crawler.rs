use crate::canonical::{Canonicalizer, Scheme};
use crate::error::Result;
use crate::extract::{HtmlExtractor, LinkExtractor};
use crate::fetch::{BROWSER_USER_AGENT, DEFAULT_TIMEOUT_SECS, Fetcher, HttpFetcher};
use crate::filter::{FilterDecision, LinkFilter};
use crate::frontier::{VisitedSet, WaitingSet};
use crate::link::LinkRecord;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Called before each fetch with the number of pages visited so far and the
/// url about to be fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Immutable settings for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub scheme: Scheme,
    pub max_levels: usize,
    /// Exact-match block list, canonicalised against the root at run time.
    pub exclude: Vec<String>,
    /// User patterns; the mailto rule is always added in front.
    pub exclude_regex: Vec<String>,
    /// Keep the server's `Last-Modified` on visited records.
    pub use_server_last_modified: bool,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Http,
            max_levels: 5,
            exclude: Vec::new(),
            exclude_regex: Vec::new(),
            use_server_last_modified: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// Breadth-first, one-page-at-a-time crawler of a single site.
pub struct Crawler {
    config: CrawlConfig,
    patterns: Vec<Regex>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    progress_callback: Option<ProgressCallback>,
}

/// Everything the crawl mutates. Owned by a single `run` call.
#[derive(Default)]
struct CrawlState {
    waiting: WaitingSet,
    visited: VisitedSet,
    // urls whose fetch or parse failed. They are never queued again, so a
    // page that was down for one request stays out of this run's sitemap
    // even when later pages link to it.
    dropped: HashSet<String>,
}

impl CrawlState {
    fn enqueue(&mut self, url: String, depth: usize) -> bool {
        if self.waiting.contains(&url)
            || self.visited.contains(&url)
            || self.dropped.contains(&url)
        {
            return false;
        }
        self.waiting.insert_if_absent(LinkRecord::new(url, depth))
    }
}

impl Crawler {
    /// Fails on an invalid exclude pattern or when the HTTP client cannot be
    /// built, before any request is made.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let patterns = LinkFilter::compile_patterns(&config.exclude_regex)?;
        let fetcher = HttpFetcher::new(config.timeout, &config.user_agent)?;

        Ok(Self {
            config,
            patterns,
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(HtmlExtractor),
            progress_callback: None,
        })
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn LinkExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls the site under `root_url` until nothing is left waiting.
    ///
    /// Only an unusable root is an error. Pages that fail to fetch or parse
    /// are left out of the result and the crawl carries on.
    pub async fn run(&self, root_url: &str) -> Result<VisitedSet> {
        let canonicalizer = Canonicalizer::new(self.config.scheme, root_url)?;
        let exclude = self
            .config
            .exclude
            .iter()
            .map(|entry| canonicalizer.canonicalize(entry))
            .collect();
        let filter = LinkFilter::new(canonicalizer.root(), exclude, self.patterns.clone());

        info!(
            "Starting crawl of {} (max depth {})",
            canonicalizer.root(),
            self.config.max_levels
        );

        let mut state = CrawlState::default();
        state.enqueue(canonicalizer.root().to_string(), 0);

        while let Some(record) = state.waiting.pop_oldest() {
            self.step(record, &canonicalizer, &filter, &mut state).await;
        }

        info!(
            "Crawl complete. Visited {} pages, dropped {}",
            state.visited.len(),
            state.dropped.len()
        );
        Ok(state.visited)
    }

    async fn step(
        &self,
        record: LinkRecord,
        canonicalizer: &Canonicalizer,
        filter: &LinkFilter,
        state: &mut CrawlState,
    ) {
        debug!("[depth {}] {}", record.depth, record.url);
        if let Some(ref callback) = self.progress_callback {
            callback(state.visited.len(), record.url.clone());
        }

        let outcome = self.fetcher.fetch(&record.url).await;
        let Some(body) = outcome.body else {
            warn!("Dropping {}: could not fetch", record.url);
            state.dropped.insert(record.url);
            return;
        };
        let Some(hrefs) = self.anchors(&body) else {
            warn!("Dropping {}: unparsable content", record.url);
            state.dropped.insert(record.url);
            return;
        };

        let last_modified = if self.config.use_server_last_modified {
            outcome.last_modified
        } else {
            None
        };
        let depth = record.depth;
        let url = record.url.clone();
        if !state.visited.insert(record.with_last_modified(last_modified)) {
            debug!("{} was already visited, keeping the first record", url);
        }

        if depth >= self.config.max_levels {
            debug!("Depth limit reached at {}, not following its links", url);
            return;
        }

        for href in hrefs {
            let candidate = canonicalizer.canonicalize(&href);
            match filter.check(&candidate) {
                FilterDecision::Accept => {
                    if state.enqueue(candidate.clone(), depth + 1) {
                        debug!("  -> queued {} at depth {}", candidate, depth + 1);
                    }
                }
                decision => debug!("  -> skipping {} ({:?})", candidate, decision),
            }
        }
    }

    // Parsed documents never outlive this call, so nothing non-Send is held
    // across an await.
    fn anchors(&self, body: &str) -> Option<Vec<String>> {
        let document = self.extractor.parse(body)?;
        Some(document.anchors())
    }
}
