use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client};
use thiserror::Error;

use super::droid::{BrowserError, PageBrowser};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),
}

/// One way of turning a url into page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain GET of the raw markup.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(user_agent: impl Into<String>) -> Self {
        HttpFetcher {
            client: Client::new(),
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let res = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(res.text().await?)
    }
}

/// DOM after the page's scripts have run, rendered without a load timeout.
pub struct RenderedFetcher {
    browser: Arc<dyn PageBrowser>,
}

impl RenderedFetcher {
    pub fn new(browser: Arc<dyn PageBrowser>) -> Self {
        RenderedFetcher { browser }
    }
}

#[async_trait]
impl PageFetcher for RenderedFetcher {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.browser.render(url, None).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchError, HttpFetcher, PageFetcher};

    #[tokio::test]
    async fn http_fetch_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/reviews/acme")
            .match_header("user-agent", "repute-test/1.0")
            .with_status(200)
            .with_body("<html><body><p>Acme review</p></body></html>")
            .create_async()
            .await;
        let fetcher = HttpFetcher::new("repute-test/1.0");

        let html = fetcher
            .fetch(&format!("{}/reviews/acme", server.url()))
            .await
            .unwrap();

        assert_eq!(html, "<html><body><p>Acme review</p></body></html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_fetch_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/reviews/acme")
            .with_status(403)
            .with_body("Access denied")
            .create_async()
            .await;
        let fetcher = HttpFetcher::new("repute-test/1.0");

        let result = fetcher
            .fetch(&format!("{}/reviews/acme", server.url()))
            .await;

        assert!(matches!(result, Err(FetchError::Status(403))));
    }
}
