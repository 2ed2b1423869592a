use sitemapper_scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("Protocol pattern '{0}' is wrong, set \"http\" or \"https\"")]
    InvalidProtocol(String),

    #[error("Sitemap path '{}' doesn't exist or is not a directory", .0.display())]
    MissingOutputDir(PathBuf),

    #[error("The sitemap file name must be specified")]
    EmptySitemapName,

    #[error("No website address configured and no base URL available")]
    NoRootUrl,

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Saving sitemap to '{}' failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SitemapError>;
