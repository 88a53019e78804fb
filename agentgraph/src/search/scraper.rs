//! Page scraping: raw HTML, markdown and plain-text body.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::AgentError;

/// One fetched page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrapedPage {
    pub html: String,
    pub body_markdown: String,
    pub body_text: String,
}

/// Scraper capability.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage, AgentError>;
}

/// Scraper over plain HTTP GET. Pages rendered by JavaScript come back as served.
pub struct HttpScraper {
    client: reqwest::Client,
}

impl Default for HttpScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpScraper {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Uses a custom client (timeouts, proxies, user agent).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage, AgentError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AgentError::ExecutionFailed(format!(
                "request failed with status: {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("failed to read response: {}", e)))?;
        Ok(parse_html(html))
    }
}

/// Splits a page into markdown and plain text. Markdown conversion failures leave
/// `body_markdown` empty.
pub(crate) fn parse_html(html: String) -> ScrapedPage {
    let body = body_of(&html);
    let body_markdown = htmd::convert(body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "HTML to markdown conversion failed");
        String::new()
    });
    let body_text = html_to_text(body);
    ScrapedPage {
        html,
        body_markdown,
        body_text,
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern compiles"))
}

/// Inner `<body>` markup, or the whole document when there is no body element.
fn body_of(html: &str) -> &str {
    static BODY: OnceLock<Regex> = OnceLock::new();
    regex(&BODY, r"(?is)<body[^>]*>(.*)</body>")
        .captures(html)
        .and_then(|c| c.get(1))
        .map_or(html, |m| m.as_str())
}

fn html_to_text(html: &str) -> String {
    static HIDDEN: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();
    static SPACE: OnceLock<Regex> = OnceLock::new();

    let visible = regex(&HIDDEN, r"(?is)<(script|style|noscript)[^>]*>.*?</(script|style|noscript)>")
        .replace_all(html, " ");
    let text = regex(&TAG, r"(?s)<[^>]*>").replace_all(&visible, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    regex(&SPACE, r"\s+").replace_all(&text, " ").trim().to_string()
}
