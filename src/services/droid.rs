use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::{error::WebDriverError, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),

    #[error("Page load timed out after {0:?}")]
    Timeout(Duration),
}

/// Renders a page in a real browser and hands back the resulting DOM.
#[async_trait]
pub trait PageBrowser: Send + Sync {
    /// `timeout` bounds the page load; `None` leaves the driver's default.
    async fn render(&self, url: &str, timeout: Option<Duration>) -> Result<String, BrowserError>;
}

/// Headless Chrome driven over a WebDriver server. Every render gets its own
/// session, which is closed before `render` returns.
pub struct Droid {
    webdriver_url: String,
}

impl Droid {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Droid {
            webdriver_url: webdriver_url.into(),
        }
    }

    async fn launch(&self) -> Result<WebDriver, BrowserError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()?;
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;

        Ok(WebDriver::new(&self.webdriver_url, caps).await?)
    }

    async fn load_source(
        driver: &WebDriver,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<String, BrowserError> {
        match timeout {
            Some(timeout) => tokio::time::timeout(timeout, driver.goto(url))
                .await
                .map_err(|_| BrowserError::Timeout(timeout))??,
            None => driver.goto(url).await?,
        }
        Ok(driver.source().await?)
    }
}

#[async_trait]
impl PageBrowser for Droid {
    async fn render(&self, url: &str, timeout: Option<Duration>) -> Result<String, BrowserError> {
        let driver = self.launch().await?;
        log::info!("Rendering {} in headless browser", url);

        let result = Self::load_source(&driver, url, timeout).await;

        if let Err(e) = driver.quit().await {
            log::warn!("Failed to close browser session after {}: {:?}", url, e);
        }

        result
    }
}
