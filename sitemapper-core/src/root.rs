use std::env;

pub const BASE_URL_ENV: &str = "SITEMAPPER_BASE_URL";

/// Supplies the site root when the config does not name one.
pub trait RootUrlProvider {
    fn root_url(&self) -> Option<String>;
}

/// A base URL known up front, e.g. from the site's own configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticRootUrl(Option<String>);

impl StaticRootUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(Some(url.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticRootUrl {
    fn from(url: Option<String>) -> Self {
        Self(url)
    }
}

impl RootUrlProvider for StaticRootUrl {
    fn root_url(&self) -> Option<String> {
        self.0
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

/// Reads the base URL from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvRootUrl {
    var: String,
}

impl EnvRootUrl {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvRootUrl {
    fn default() -> Self {
        Self::new(BASE_URL_ENV)
    }
}

impl RootUrlProvider for EnvRootUrl {
    fn root_url(&self) -> Option<String> {
        env::var(&self.var)
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }
}

/// First provider with an answer wins.
#[derive(Default)]
pub struct ChainedRootUrl {
    providers: Vec<Box<dyn RootUrlProvider>>,
}

impl ChainedRootUrl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, provider: impl RootUrlProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl RootUrlProvider for ChainedRootUrl {
    fn root_url(&self) -> Option<String> {
        self.providers.iter().find_map(|p| p.root_url())
    }
}
