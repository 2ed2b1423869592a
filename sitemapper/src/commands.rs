use clap::{arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitemapper")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitemapper")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner, progress and summary output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Log every queued and skipped link")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("generate")
                .about(
                    "Crawl the site breadth-first and write its sitemap.xml. Suitable for \
                cron jobs and systemd timers.",
                )
                .arg(
                    arg!(-c --"config" <PATH>)
                        .required(false)
                        .help("JSON config file (camelCase keys, e.g. sitemapPath, maxLevels)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("Site to crawl (overrides websiteAddress and the base URL)")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"base-url" <URL>)
                        .required(false)
                        .help("Site base URL used when no --url/websiteAddress is given")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-p --"protocol" <SCHEME>)
                        .required(false)
                        .help("Protocol every sitemap URL is forced onto")
                        .value_parser(["http", "https"]),
                )
                .arg(
                    arg!(-o --"output-dir" <PATH>)
                        .required(false)
                        .help("Existing directory the sitemap is written to"),
                )
                .arg(
                    arg!(-n --"name" <FILE>)
                        .required(false)
                        .help("Sitemap file name (default: sitemap.xml)"),
                )
                .arg(
                    arg!(-l --"max-levels" <N>)
                        .required(false)
                        .help("Deepest level whose links are still followed (default: 5)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"changefreq" <VALUE>)
                        .required(false)
                        .help("changefreq written for every entry (default: weekly)"),
                )
                .arg(
                    arg!(--"no-lastmod")
                        .required(false)
                        .help("Leave <lastmod> out of every entry")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"ignore-server-lastmod")
                        .required(false)
                        .help("Stamp entries with the generation time instead of Last-Modified")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-e --"exclude" <URL>)
                        .required(false)
                        .help("URL to leave out of the sitemap (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-x --"exclude-regex" <PATTERN>)
                        .required(false)
                        .help("Regex; matching URLs are left out (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-t --"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-page fetch timeout in seconds (default: 120)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Print the run summary as JSON")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
