pub mod config;
pub mod error;
pub mod generate;
pub mod root;
pub mod sitemap;

pub use config::SitemapConfig;
pub use error::{Result, SitemapError};
pub use generate::{GenerateOptions, GenerateSummary, generate_report, generate_sitemap};
pub use root::{ChainedRootUrl, EnvRootUrl, RootUrlProvider, StaticRootUrl};
