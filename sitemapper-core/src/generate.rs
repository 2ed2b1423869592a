use crate::config::SitemapConfig;
use crate::error::Result;
use crate::root::RootUrlProvider;
use crate::sitemap::{RenderOptions, render_sitemap, save_sitemap};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use sitemapper_scanner::{Crawler, LinkRecord, ProgressCallback, VisitedSet};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Options for a "generate now" run that don't belong in the config file.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub show_progress_bars: bool,
}

/// What a finished run wrote.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    pub root: String,
    pub output_path: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<LinkRecord>,
    /// Number of entries at each depth.
    pub pages_by_depth: BTreeMap<usize, usize>,
}

impl GenerateSummary {
    pub fn new(
        root: String,
        output_path: PathBuf,
        generated_at: DateTime<Utc>,
        entries: Vec<LinkRecord>,
    ) -> Self {
        let mut pages_by_depth = BTreeMap::new();
        for entry in &entries {
            *pages_by_depth.entry(entry.depth).or_insert(0) += 1;
        }
        Self {
            root,
            output_path,
            generated_at,
            entries,
            pages_by_depth,
        }
    }
}

/// Validates the config, crawls the site and writes the sitemap.
///
/// Configuration problems are reported before any request is made.
pub async fn generate_sitemap(
    config: &SitemapConfig,
    provider: &dyn RootUrlProvider,
    options: GenerateOptions,
) -> Result<GenerateSummary> {
    config.validate()?;
    let root = config.resolve_root(provider)?;

    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Starting crawl of {}...", root));
        Some(pb)
    } else {
        None
    };

    let mut crawler = Crawler::new(config.crawl_config()?)?;
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let callback: ProgressCallback = Arc::new(move |visited: usize, url: String| {
            pb_clone.set_message(format!("{} pages so far, fetching {}", visited, url));
        });
        crawler = crawler.with_progress_callback(callback);
    }

    let crawl = crawler.run(&root).await;
    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    write_sitemap(config, root, crawl?)
}

/// Renders `visited` with the config's entry options and persists it.
pub fn write_sitemap(
    config: &SitemapConfig,
    root: String,
    visited: VisitedSet,
) -> Result<GenerateSummary> {
    let generated_at = Utc::now();
    let output_path = config.output_file();
    let content = render_sitemap(&visited, &RenderOptions::from(config), generated_at);
    save_sitemap(&content, &output_path)?;

    info!(
        "Wrote {} entries to {}",
        visited.len(),
        output_path.display()
    );

    Ok(GenerateSummary::new(
        root,
        output_path,
        generated_at,
        visited.into_records(),
    ))
}

/// Human-readable summary of a run
pub fn generate_report(summary: &GenerateSummary) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Site: {}\n", summary.root));
    report.push_str(&format!("  Pages written: {}\n", summary.entries.len()));
    report.push_str(&format!(
        "  Sitemap: {}\n",
        summary.output_path.display()
    ));
    report.push_str(&format!(
        "  Generated at: {}\n",
        summary.generated_at.to_rfc3339()
    ));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str("## Pages by depth\n");
    for (depth, count) in &summary.pages_by_depth {
        report.push_str(&format!("  depth {}: {} page(s)\n", depth, count));
    }
    report.push('\n');

    report
}
