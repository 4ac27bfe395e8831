use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::configuration::SearchSettings;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A web search that returns result urls in rank order.
#[async_trait]
pub trait LinkSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError>;
}

pub struct SerpApiClient {
    client: Client,
    api_key: String,
    url: String,
    engine: String,
    num_results: u8,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    api_key: &'a str,
    engine: &'a str,
    num: u8,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    link: Option<String>,
}

impl SerpApiClient {
    pub fn new(settings: &SearchSettings, api_key: String) -> Self {
        SerpApiClient {
            client: Client::new(),
            api_key,
            url: settings.base_url.clone(),
            engine: settings.engine.clone(),
            num_results: settings.num_results,
        }
    }
}

#[async_trait]
impl LinkSearch for SerpApiClient {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let res = self
            .client
            .get(&self.url)
            .query(&SearchQuery {
                q: query,
                api_key: &self.api_key,
                engine: &self.engine,
                num: self.num_results,
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = res.json::<SearchResponse>().await?;
        let links: Vec<String> = body
            .organic_results
            .into_iter()
            .filter_map(|r| r.link)
            .collect();

        log::info!("Found {} links for query: {}", links.len(), query);

        Ok(links)
    }
}

pub fn build_review_search_query(
    company: &str,
    suffix: Option<&str>,
    review_domains: &[String],
) -> String {
    let sites = review_domains
        .iter()
        .map(|d| format!("site:{}", d))
        .collect::<Vec<String>>()
        .join(" OR ");

    match suffix {
        Some(suffix) => format!("{} {} reviews {}", company, suffix, sites),
        None => format!("{} reviews {}", company, sites),
    }
}

pub fn build_homepage_search_query(company: &str, blacklist: &[String]) -> String {
    let excluded = blacklist
        .iter()
        .map(|d| format!("-site:{}", d))
        .collect::<Vec<String>>()
        .join(" ");

    format!("{} official site {}", company, excluded)
        .trim_end()
        .to_string()
}

/// Candidate review pages for `company`, restricted to `review_domains`.
pub async fn get_review_links(
    search: &dyn LinkSearch,
    company: &str,
    suffix: Option<&str>,
    review_domains: &[String],
) -> Result<Vec<String>, SearchError> {
    let query = build_review_search_query(company, suffix, review_domains);
    search.search(&query).await
}
