// End-to-end tests for sitemap generation against a mock site

use sitemapper_core::{
    GenerateOptions, SitemapConfig, SitemapError, StaticRootUrl, generate_report,
    generate_sitemap,
};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page_path: &str, links: &[&str]) {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>", href))
        .collect();
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .insert_header("last-modified", "Wed, 21 Oct 2015 07:28:00 GMT")
                .set_body_string(format!("<html><body>{}</body></html>", anchors)),
        )
        .mount(server)
        .await;
}

async fn small_site() -> MockServer {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/about", "/contact", "mailto:hi@example.com"]).await;
    mount_page(&server, "/about", &["/", "/contact", "https://elsewhere.example/"]).await;
    mount_page(&server, "/contact", &["/about"]).await;
    server
}

fn config_for(dir: &TempDir, root: &str) -> SitemapConfig {
    SitemapConfig {
        sitemap_path: Some(dir.path().to_string_lossy().to_string()),
        website_address: Some(root.to_string()),
        fetch_timeout_secs: 5,
        ..SitemapConfig::default()
    }
}

// ============================================================================
// Successful runs
// ============================================================================

#[tokio::test]
async fn test_generate_small_site() {
    let server = small_site().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, &server.uri());

    let summary = generate_sitemap(&config, &StaticRootUrl::none(), GenerateOptions::default())
        .await
        .unwrap();

    let root = server.uri();
    let urls: Vec<&str> = summary.entries.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            root.clone(),
            format!("{}/about", root),
            format!("{}/contact", root),
        ]
    );
    assert_eq!(summary.output_path, dir.path().join("sitemap.xml"));

    let xml = fs::read_to_string(&summary.output_path).unwrap();
    assert_eq!(xml.matches("<url>").count(), 3);
    assert!(xml.contains("<priority>1.00</priority>"));
    assert_eq!(xml.matches("<priority>0.90</priority>").count(), 2);
    assert!(xml.contains("<lastmod>2015-10-21T07:28:00+00:00</lastmod>"));
    assert!(!xml.contains("mailto"));
    assert!(!xml.contains("elsewhere.example"));

    let report = generate_report(&summary);
    assert!(report.contains("Pages written: 3"));
}

#[tokio::test]
async fn test_generate_uses_provider_root() {
    let server = small_site().await;
    let dir = TempDir::new().unwrap();
    let config = SitemapConfig {
        website_address: None,
        max_levels: 0,
        ..config_for(&dir, "")
    };

    let summary = generate_sitemap(
        &config,
        &StaticRootUrl::new(server.uri()),
        GenerateOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(summary.entries.len(), 1);
    assert_eq!(summary.root, server.uri());
}

#[tokio::test]
async fn test_generate_without_server_lastmod() {
    let server = small_site().await;
    let dir = TempDir::new().unwrap();
    let config = SitemapConfig {
        last_mod_from_server: false,
        ..config_for(&dir, &server.uri())
    };

    let summary = generate_sitemap(&config, &StaticRootUrl::none(), GenerateOptions::default())
        .await
        .unwrap();

    let xml = fs::read_to_string(&summary.output_path).unwrap();
    assert_eq!(xml.matches("<lastmod>").count(), 3);
    assert!(!xml.contains("2015-10-21"));
}

#[tokio::test]
async fn test_generate_with_exclusions() {
    let server = small_site().await;
    let dir = TempDir::new().unwrap();
    let config = SitemapConfig {
        exclude: vec!["/contact".to_string()],
        add_lastmod: false,
        ..config_for(&dir, &server.uri())
    };

    let summary = generate_sitemap(&config, &StaticRootUrl::none(), GenerateOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.entries.len(), 2);
    let xml = fs::read_to_string(&summary.output_path).unwrap();
    assert!(!xml.contains("/contact"));
    assert!(!xml.contains("<lastmod>"));
}

#[tokio::test]
async fn test_unreachable_root_writes_empty_sitemap() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, "http://127.0.0.1:9");

    let summary = generate_sitemap(&config, &StaticRootUrl::none(), GenerateOptions::default())
        .await
        .unwrap();

    assert!(summary.entries.is_empty());
    let xml = fs::read_to_string(&summary.output_path).unwrap();
    assert!(xml.contains("<urlset"));
    assert!(!xml.contains("<url>"));
}

// ============================================================================
// Fatal errors
// ============================================================================

#[tokio::test]
async fn test_invalid_config_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = SitemapConfig {
        protocol_pattern: "ftp".to_string(),
        ..config_for(&dir, &server.uri())
    };

    let result =
        generate_sitemap(&config, &StaticRootUrl::none(), GenerateOptions::default()).await;
    assert!(matches!(result, Err(SitemapError::InvalidProtocol(_))));
    assert!(!dir.path().join("sitemap.xml").exists());
}

#[tokio::test]
async fn test_invalid_exclude_regex_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = SitemapConfig {
        exclude_regex: vec!["([unclosed".to_string()],
        ..config_for(&dir, &server.uri())
    };

    let result =
        generate_sitemap(&config, &StaticRootUrl::none(), GenerateOptions::default()).await;
    assert!(matches!(result, Err(SitemapError::Scan(_))));
}

#[tokio::test]
async fn test_missing_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = SitemapConfig {
        website_address: None,
        ..config_for(&dir, "")
    };

    let result =
        generate_sitemap(&config, &StaticRootUrl::none(), GenerateOptions::default()).await;
    assert!(matches!(result, Err(SitemapError::NoRootUrl)));
}

#[tokio::test]
async fn test_write_failure_is_reported() {
    let server = small_site().await;
    let dir = TempDir::new().unwrap();
    let config = SitemapConfig {
        sitemap_name: "missing/sitemap.xml".to_string(),
        max_levels: 0,
        ..config_for(&dir, &server.uri())
    };

    let result =
        generate_sitemap(&config, &StaticRootUrl::none(), GenerateOptions::default()).await;
    assert!(matches!(result, Err(SitemapError::Write { .. })));
}
