use crate::error::{Result, SitemapError};
use crate::root::RootUrlProvider;
use serde::{Deserialize, Serialize};
use sitemapper_scanner::fetch::{BROWSER_USER_AGENT, DEFAULT_TIMEOUT_SECS};
use sitemapper_scanner::{CrawlConfig, Scheme};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_SITEMAP_NAME: &str = "sitemap.xml";
pub const DEFAULT_MAX_LEVELS: usize = 5;
pub const DEFAULT_CHANGEFREQ: &str = "weekly";

/// Values the sitemaps.org protocol defines for `<changefreq>`.
pub const CHANGEFREQ_VALUES: [&str; 7] = [
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

/// Everything a sitemap run can be configured with. Keys are camelCase in
/// config files (`protocolPattern`, `sitemapPath`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SitemapConfig {
    /// "http" or "https"; every URL in the sitemap is forced onto it.
    pub protocol_pattern: String,
    /// Directory the sitemap is written to. Must already exist.
    pub sitemap_path: Option<String>,
    pub sitemap_name: String,
    /// Site to crawl. Falls back to the root URL provider when unset.
    pub website_address: Option<String>,
    pub max_levels: usize,
    pub changefreq: String,
    /// Trust `Last-Modified` from the server instead of stamping "now".
    pub last_mod_from_server: bool,
    pub add_lastmod: bool,
    pub exclude: Vec<String>,
    pub exclude_regex: Vec<String>,
    pub fetch_timeout_secs: u64,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            protocol_pattern: Scheme::Http.to_string(),
            sitemap_path: None,
            sitemap_name: DEFAULT_SITEMAP_NAME.to_string(),
            website_address: None,
            max_levels: DEFAULT_MAX_LEVELS,
            changefreq: DEFAULT_CHANGEFREQ.to_string(),
            last_mod_from_server: true,
            add_lastmod: true,
            exclude: Vec::new(),
            exclude_regex: Vec::new(),
            fetch_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SitemapConfig {
    pub fn scheme(&self) -> Result<Scheme> {
        self.protocol_pattern
            .parse()
            .map_err(|_| SitemapError::InvalidProtocol(self.protocol_pattern.clone()))
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(self.sitemap_path.as_deref().unwrap_or_default().trim())
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_dir().join(self.sitemap_name.trim())
    }

    /// Checks everything that must hold before the crawl starts.
    pub fn validate(&self) -> Result<()> {
        self.scheme()?;

        let dir = self.output_dir();
        if dir.as_os_str().is_empty() || !dir.is_dir() {
            return Err(SitemapError::MissingOutputDir(dir));
        }

        if self.sitemap_name.trim().is_empty() {
            return Err(SitemapError::EmptySitemapName);
        }

        if !CHANGEFREQ_VALUES.contains(&self.changefreq.as_str()) {
            warn!(
                "changefreq '{}' is not one of {:?}, writing it anyway",
                self.changefreq, CHANGEFREQ_VALUES
            );
        }

        Ok(())
    }

    /// `websiteAddress` wins; otherwise ask the provider.
    pub fn resolve_root(&self, provider: &dyn RootUrlProvider) -> Result<String> {
        self.website_address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(str::to_string)
            .or_else(|| provider.root_url())
            .ok_or(SitemapError::NoRootUrl)
    }

    /// Server timestamps are only worth reading when they will be written.
    pub fn uses_server_last_modified(&self) -> bool {
        self.add_lastmod && self.last_mod_from_server
    }

    pub fn crawl_config(&self) -> Result<CrawlConfig> {
        Ok(CrawlConfig {
            scheme: self.scheme()?,
            max_levels: self.max_levels,
            exclude: self.exclude.clone(),
            exclude_regex: self.exclude_regex.clone(),
            use_server_last_modified: self.uses_server_last_modified(),
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            user_agent: BROWSER_USER_AGENT.to_string(),
        })
    }
}

/// On-disk config: the sitemap options plus the site's own base URL, which
/// acts as the default root when `websiteAddress` is not set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(flatten)]
    pub sitemap: SitemapConfig,
}

impl ConfigFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SitemapError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SitemapError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }
}
