use clap::ArgMatches;
use colored::Colorize;
use sitemapper_core::config::ConfigFile;
use sitemapper_core::{
    ChainedRootUrl, EnvRootUrl, GenerateOptions, SitemapConfig, StaticRootUrl, generate_report,
    generate_sitemap,
};
use std::path::{Path, PathBuf};
use url::Url;

// Helper functions for the generate handler

/// Load the config file when one is given, otherwise start from defaults
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, String> {
    let mut file = match path {
        Some(path) => ConfigFile::load(path).map_err(|e| e.to_string())?,
        None => ConfigFile::default(),
    };
    expand_sitemap_path(&mut file.sitemap);
    Ok(file)
}

/// Expand a leading `~` in the output directory
pub fn expand_sitemap_path(config: &mut SitemapConfig) {
    if let Some(ref dir) = config.sitemap_path {
        let expanded = shellexpand::tilde(dir.trim()).into_owned();
        config.sitemap_path = Some(expanded);
    }
}

/// Apply command-line flags on top of whatever the config file said.
///
/// Exclude lists are appended to, every other option is replaced.
pub fn apply_overrides(args: &ArgMatches, config: &mut SitemapConfig) {
    if let Some(url) = args.get_one::<Url>("url") {
        config.website_address = Some(url.as_str().to_string());
    }
    if let Some(protocol) = args.get_one::<String>("protocol") {
        config.protocol_pattern = protocol.clone();
    }
    if let Some(dir) = args.get_one::<String>("output-dir") {
        config.sitemap_path = Some(dir.clone());
        expand_sitemap_path(config);
    }
    if let Some(name) = args.get_one::<String>("name") {
        config.sitemap_name = name.clone();
    }
    if let Some(levels) = args.get_one::<usize>("max-levels") {
        config.max_levels = *levels;
    }
    if let Some(changefreq) = args.get_one::<String>("changefreq") {
        config.changefreq = changefreq.clone();
    }
    if args.get_flag("no-lastmod") {
        config.add_lastmod = false;
    }
    if args.get_flag("ignore-server-lastmod") {
        config.last_mod_from_server = false;
    }
    if let Some(excludes) = args.get_many::<String>("exclude") {
        config.exclude.extend(excludes.cloned());
    }
    if let Some(patterns) = args.get_many::<String>("exclude-regex") {
        config.exclude_regex.extend(patterns.cloned());
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        config.fetch_timeout_secs = *timeout;
    }
}

/// `--base-url` (or the config file's `baseUrl`) first, then the environment.
pub fn root_provider(base_url: Option<String>) -> ChainedRootUrl {
    ChainedRootUrl::new()
        .then(StaticRootUrl::from(base_url))
        .then(EnvRootUrl::default())
}

pub fn print_banner() {
    eprintln!(
        "{} {}",
        "sitemapper".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), msg);
    std::process::exit(1);
}

pub async fn handle_generate(args: &ArgMatches, quiet: bool) {
    let config_path = args.get_one::<PathBuf>("config");
    let file = match load_config(config_path.map(PathBuf::as_path)) {
        Ok(file) => file,
        Err(e) => fail(e),
    };

    let mut config = file.sitemap;
    apply_overrides(args, &mut config);
    let base_url = args
        .get_one::<Url>("base-url")
        .map(|url| url.as_str().to_string())
        .or(file.base_url);
    let provider = root_provider(base_url);

    let json = args.get_flag("json");
    let options = GenerateOptions {
        show_progress_bars: !quiet && !json,
    };

    let summary = match generate_sitemap(&config, &provider, options).await {
        Ok(summary) => summary,
        Err(e) => fail(format!("Sitemap generation failed: {}", e)),
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(format!("Failed to serialize summary: {}", e)),
        }
    } else if !quiet {
        println!("\n{} Sitemap written!\n", "✓".green().bold());
        print!("{}", generate_report(&summary));
    }
}
