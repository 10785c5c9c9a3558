use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("wikipedia request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Source of the plain-text article a round is generated from.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns `None` when no single article matches the title.
    async fn fetch_article(&self, title: &str) -> Result<Option<String>, ArticleError>;
}

pub struct WikipediaClient {
    http: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    query: Option<QueryPages>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

/// Picks the article text out of a `formatversion=2` query response.
/// Missing, invalid and disambiguation pages yield `None`.
pub(crate) fn extract_article(res: QueryResponse) -> Option<String> {
    let page = res.query?.pages.into_iter().next()?;
    if page.missing || page.invalid {
        return None;
    }
    if page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some())
    {
        debug!(title = %page.title, "skipping disambiguation page");
        return None;
    }
    page.extract.filter(|text| !text.trim().is_empty())
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    async fn fetch_article(&self, title: &str) -> Result<Option<String>, ArticleError> {
        let res = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: QueryResponse = res.json().await?;

        let article = extract_article(body);
        if article.is_none() {
            warn!(title, "no wikipedia article found");
        }
        Ok(article)
    }
}

#[cfg(test)]
#[path = "tests/wikipedia_tests.rs"]
mod tests;
