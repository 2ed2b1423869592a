use crate::error::Result;
use regex::Regex;
use std::collections::HashSet;

/// Always applied ahead of user patterns: e-mail links are never pages.
pub const MAILTO_PATTERN: &str = r"^(.*)(mailto:)(.*)$";

/// Why a canonical URL was or wasn't queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    Accept,
    OffDomain,
    Excluded,
    ExcludedByPattern(String),
}

/// Decides, once per discovered URL, whether it belongs in the sitemap.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    root: String,
    exclude: HashSet<String>,
    patterns: Vec<Regex>,
}

impl LinkFilter {
    /// `root` and every `exclude` entry must already be canonical.
    pub fn new(root: impl Into<String>, exclude: HashSet<String>, patterns: Vec<Regex>) -> Self {
        Self {
            root: root.into(),
            exclude,
            patterns,
        }
    }

    /// Compiles user patterns with the built-in mailto rule merged in front.
    pub fn compile_patterns<I, S>(user_patterns: I) -> Result<Vec<Regex>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = vec![Regex::new(MAILTO_PATTERN)?];
        for pattern in user_patterns {
            patterns.push(Regex::new(pattern.as_ref())?);
        }
        Ok(patterns)
    }

    /// Rules are checked in order and the first one that rejects wins.
    pub fn check(&self, url: &str) -> FilterDecision {
        if !self.is_within_root(url) {
            return FilterDecision::OffDomain;
        }
        if self.exclude.contains(url) {
            return FilterDecision::Excluded;
        }
        if let Some(pattern) = self.patterns.iter().find(|p| p.is_match(url)) {
            return FilterDecision::ExcludedByPattern(pattern.as_str().to_string());
        }
        FilterDecision::Accept
    }

    fn is_within_root(&self, url: &str) -> bool {
        match url.strip_prefix(self.root.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
            None => false,
        }
    }
}
