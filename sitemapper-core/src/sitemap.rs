// Sitemap rendering and persistence

use crate::config::SitemapConfig;
use crate::error::{Result, SitemapError};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use sitemapper_scanner::LinkRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const SCHEMA_INSTANCE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://www.sitemaps.org/schemas/sitemap/0.9 http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd";

/// The parts of the config that shape each `<url>` entry.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub changefreq: String,
    pub add_lastmod: bool,
    pub last_mod_from_server: bool,
}

impl From<&SitemapConfig> for RenderOptions {
    fn from(config: &SitemapConfig) -> Self {
        Self {
            changefreq: config.changefreq.clone(),
            add_lastmod: config.add_lastmod,
            last_mod_from_server: config.last_mod_from_server,
        }
    }
}

/// Renders the records, in the order given, as a sitemaps.org 0.9 document.
///
/// `now` stands in for every entry that has no trusted server timestamp.
pub fn render_sitemap<'a, I>(records: I, options: &RenderOptions, now: DateTime<Utc>) -> String
where
    I: IntoIterator<Item = &'a LinkRecord>,
{
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<urlset xmlns=\"{}\" xmlns:xsi=\"{}\" xsi:schemaLocation=\"{}\">\n",
        SITEMAP_NAMESPACE, SCHEMA_INSTANCE, SCHEMA_LOCATION
    ));

    let changefreq = escape(options.changefreq.as_str());
    for record in records {
        xml.push_str("<url>");
        xml.push_str(&format!("<loc>{}</loc>", escape_loc(&record.url)));
        if let Some(lastmod) = lastmod_for(record, options, now) {
            xml.push_str(&format!("<lastmod>{}</lastmod>", lastmod));
        }
        xml.push_str(&format!("<changefreq>{}</changefreq>", changefreq));
        xml.push_str(&format!("<priority>{:.2}</priority>", record.priority));
        xml.push_str("</url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// `None` when lastmod is switched off. A record's own timestamp is used only
/// when the whole run trusts server timestamps.
pub fn lastmod_for(
    record: &LinkRecord,
    options: &RenderOptions,
    now: DateTime<Utc>,
) -> Option<String> {
    if !options.add_lastmod {
        return None;
    }
    let stamp = match record.last_modified {
        Some(server_time) if options.last_mod_from_server => server_time,
        _ => now,
    };
    Some(format_timestamp(stamp))
}

/// W3C datetime with second precision, e.g. `2024-05-01T10:00:00+00:00`.
pub fn format_timestamp(stamp: DateTime<Utc>) -> String {
    stamp.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Restores percent-encoded `:`, `/` and `#`, then escapes for XML.
pub fn escape_loc(url: &str) -> String {
    let mut restored = url.to_string();
    for (encoded, literal) in [("%3a", ":"), ("%2f", "/"), ("%23", "#")] {
        restored = restored
            .replace(encoded, literal)
            .replace(&encoded.to_uppercase(), literal);
    }
    escape(restored.as_str()).into_owned()
}

pub fn save_sitemap(content: &str, path: &Path) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    };
    write().map_err(|source| SitemapError::Write {
        path: path.to_path_buf(),
        source,
    })
}
