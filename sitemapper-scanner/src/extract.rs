use scraper::{Html, Selector};

/// A parsed page that can list its anchors.
pub trait Document {
    /// Raw `href` values of every anchor, in document order.
    fn anchors(&self) -> Vec<String>;
}

pub trait LinkExtractor: Send + Sync {
    /// `None` means the body is not a page we can read links from.
    fn parse(&self, body: &str) -> Option<Box<dyn Document>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

pub struct HtmlDocument {
    html: Html,
}

impl LinkExtractor for HtmlExtractor {
    fn parse(&self, body: &str) -> Option<Box<dyn Document>> {
        if body.trim().is_empty() {
            return None;
        }
        Some(Box::new(HtmlDocument {
            html: Html::parse_document(body),
        }))
    }
}

impl Document for HtmlDocument {
    fn anchors(&self) -> Vec<String> {
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}
