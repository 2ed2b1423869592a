use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Protocol every crawled URL is forced onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(ScanError::InvalidScheme(other.to_string())),
        }
    }
}

/// Turns any href found on the site into the single string form used as the
/// dedup key for the whole crawl.
///
/// No percent-decoding or query normalisation happens here, so `/a?x=1` and
/// `/a?x=2` stay distinct. Relative hrefs are joined onto the site root, not
/// onto the page they were found on.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    scheme: Scheme,
    authority: String,
    root: String,
}

impl Canonicalizer {
    /// Builds a canonicalizer for the site at `root_url`.
    ///
    /// Fails when the root is not an absolute URL with a host.
    pub fn new(scheme: Scheme, root_url: &str) -> Result<Self> {
        let root_url = root_url.trim();
        let parsed = Url::parse(root_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", root_url, e)))?;
        if parsed.host_str().is_none() {
            return Err(ScanError::InvalidUrl(format!("{} has no host", root_url)));
        }

        let mut canonicalizer = Self {
            scheme,
            authority: raw_authority(root_url).to_lowercase(),
            root: String::new(),
        };
        canonicalizer.root = canonicalizer.canonicalize(root_url);
        Ok(canonicalizer)
    }

    /// Host of the site, with the port when the root names one.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The canonical form of the root URL itself.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn canonicalize(&self, href: &str) -> String {
        let href = href.trim();

        let absolute = if href.starts_with("//") {
            format!("{}:{}", self.scheme, href)
        } else if let Some(rest) = strip_http_scheme(href) {
            format!("{}://{}", self.scheme, rest)
        } else {
            format!(
                "{}://{}/{}",
                self.scheme,
                self.authority,
                href.trim_start_matches('/')
            )
        };

        absolute
            .to_lowercase()
            .trim_end_matches(['/', '#'])
            .to_string()
    }
}

fn strip_http_scheme(href: &str) -> Option<&str> {
    ["https://", "http://"].into_iter().find_map(|prefix| {
        href.get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(|_| &href[prefix.len()..])
    })
}

// Authority as written, so an explicit default port survives into relative links.
fn raw_authority(url: &str) -> &str {
    let after_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let end = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    let authority = &after_scheme[..end];
    authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority)
}
