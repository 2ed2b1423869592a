pub mod canonical;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod frontier;
pub mod link;

pub use canonical::{Canonicalizer, Scheme};
pub use crawler::{CrawlConfig, Crawler, ProgressCallback};
pub use error::{Result, ScanError};
pub use extract::{Document, HtmlExtractor, LinkExtractor};
pub use fetch::{FetchOutcome, Fetcher, HttpFetcher};
pub use filter::{FilterDecision, LinkFilter, MAILTO_PATTERN};
pub use frontier::{VisitedSet, WaitingSet};
pub use link::{LinkRecord, priority_for_depth};
