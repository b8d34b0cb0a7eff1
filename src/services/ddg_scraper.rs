use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

pub const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
pub const MAX_RESULT_LINKS: usize = 12;
const RESULT_LINK_SELECTOR: &str = "a.result__a";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; DDGFallback/1.0)";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request timed out: {0}")]
    Timeout(String),
    #[error("search request failed: {0}")]
    Transport(String),
    #[error("search returned HTTP {0}")]
    Status(u16),
    #[error("could not parse search results: {0}")]
    Parse(String),
}

impl SearchError {
    /// Short tag stored in the debug column.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Timeout(_) => "Timeout",
            SearchError::Transport(_) => "TransportError",
            SearchError::Status(_) => "HttpStatusError",
            SearchError::Parse(_) => "ParseError",
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        match e.is_timeout() {
            true => SearchError::Timeout(e.to_string()),
            false => SearchError::Transport(e.to_string()),
        }
    }
}

/// One search per call, links in result order.
#[async_trait]
pub trait SearchProvider {
    async fn fetch_result_links(&self, query: &str) -> Result<Vec<String>, SearchError>;
}

#[derive(Serialize)]
struct DdgQuery<'a> {
    q: &'a str,
}

pub struct DuckDuckGoClient {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(DuckDuckGoClient { client, endpoint })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn fetch_result_links(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let res = self
            .client
            .post(&self.endpoint)
            .form(&DdgQuery { q: query })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(SearchError::Status(res.status().as_u16()));
        }

        let body = res.bytes().await?;
        let html_content = std::str::from_utf8(&body)
            .map_err(|e| SearchError::Parse(format!("response body is not utf-8 text: {}", e)))?;
        let links = extract_result_links(html_content)?;
        log::info!("Found {} result links for query: {}", links.len(), query);

        Ok(links)
    }
}

/// Result-link hrefs in document order, redirect wrappers removed.
pub fn extract_result_links(html_content: &str) -> Result<Vec<String>, SearchError> {
    let link_selector =
        Selector::parse(RESULT_LINK_SELECTOR).map_err(|e| SearchError::Parse(e.to_string()))?;
    let html_document = Html::parse_document(html_content);

    Ok(html_document
        .select(&link_selector)
        .filter_map(|tag| tag.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .take(MAX_RESULT_LINKS)
        .map(unwrap_redirect)
        .collect())
}

/// `//duckduckgo.com/l/?uddg=<encoded>&rut=...` becomes the decoded destination.
pub fn unwrap_redirect(href: &str) -> String {
    let absolute = match href.starts_with("//") {
        true => format!("https:{}", href),
        false => href.to_string(),
    };

    match Url::parse(&absolute) {
        Ok(parsed_url)
            if parsed_url
                .host_str()
                .is_some_and(|host| host.ends_with("duckduckgo.com"))
                && parsed_url.path() == "/l/" =>
        {
            parsed_url
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, destination)| destination.into_owned())
                .filter(|destination| !destination.is_empty())
                .unwrap_or_else(|| href.to_string())
        }
        _ => href.to_string(),
    }
}
