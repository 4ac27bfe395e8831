use std::sync::Arc;

use crate::domain::html_tag::extract_review_fragments;

use super::fetcher::PageFetcher;

/// Pulls review-like text fragments out of a page, trying each fetcher in
/// turn until one of them produces at least one fragment.
pub struct ReviewScraper {
    fetchers: Vec<Arc<dyn PageFetcher>>,
    min_fragment_len: usize,
}

impl ReviewScraper {
    pub fn new(fetchers: Vec<Arc<dyn PageFetcher>>, min_fragment_len: usize) -> Self {
        ReviewScraper {
            fetchers,
            min_fragment_len,
        }
    }

    pub async fn scrape_reviews(&self, url: &str, company: &str) -> Vec<String> {
        for fetcher in self.fetchers.iter() {
            match fetcher.fetch(url).await {
                Ok(html) => {
                    let fragments = extract_review_fragments(&html, company, self.min_fragment_len);
                    if !fragments.is_empty() {
                        log::info!(
                            "Extracted {} fragments from {} via {}",
                            fragments.len(),
                            url,
                            fetcher.name()
                        );
                        return fragments;
                    }
                    log::info!("No fragments from {} via {}", url, fetcher.name());
                }
                Err(e) => {
                    log::warn!("{} scrape failed for {}: {}", fetcher.name(), url, e);
                }
            }
        }

        vec![]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;

    use super::ReviewScraper;
    use crate::services::fetcher::{FetchError, PageFetcher};

    struct StaticFetcher {
        page: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn new(page: Option<&'static str>) -> Arc<Self> {
            Arc::new(StaticFetcher {
                page,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.page
                .map(|p| p.to_string())
                .ok_or(FetchError::Status(503))
        }
    }

    const REVIEW_PAGE: &str =
        "<html><body><p>Acme gives plenty of room to grow for new joiners.</p></body></html>";
    const EMPTY_PAGE: &str = "<html><body><div id=\"app\"></div></body></html>";

    #[tokio::test]
    async fn first_fetcher_with_fragments_wins() {
        let http = StaticFetcher::new(Some(REVIEW_PAGE));
        let browser = StaticFetcher::new(Some(REVIEW_PAGE));
        let fetchers: Vec<Arc<dyn PageFetcher>> = vec![http.clone(), browser.clone()];
        let scraper = ReviewScraper::new(fetchers, 30);

        let reviews = scraper.scrape_reviews("https://glassdoor.com/acme", "Acme").await;

        assert_eq!(reviews.len(), 1);
        assert_eq!(http.calls.load(Ordering::SeqCst), 1);
        assert_eq!(browser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_back_when_nothing_extracted() {
        let http = StaticFetcher::new(Some(EMPTY_PAGE));
        let browser = StaticFetcher::new(Some(REVIEW_PAGE));
        let fetchers: Vec<Arc<dyn PageFetcher>> = vec![http.clone(), browser.clone()];
        let scraper = ReviewScraper::new(fetchers, 30);

        let reviews = scraper.scrape_reviews("https://glassdoor.com/acme", "Acme").await;

        assert_eq!(
            reviews,
            vec!["Acme gives plenty of room to grow for new joiners."]
        );
        assert_eq!(browser.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falls_back_on_fetch_error() {
        let http = StaticFetcher::new(None);
        let browser = StaticFetcher::new(Some(REVIEW_PAGE));
        let fetchers: Vec<Arc<dyn PageFetcher>> = vec![http, browser.clone()];
        let scraper = ReviewScraper::new(fetchers, 30);

        let reviews = scraper.scrape_reviews("https://glassdoor.com/acme", "Acme").await;

        assert_eq!(reviews.len(), 1);
        assert_eq!(browser.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_failures_yield_empty_list() {
        let fetchers: Vec<Arc<dyn PageFetcher>> =
            vec![StaticFetcher::new(None), StaticFetcher::new(Some(EMPTY_PAGE))];
        let scraper = ReviewScraper::new(fetchers, 30);

        assert!(scraper
            .scrape_reviews("https://glassdoor.com/acme", "Acme")
            .await
            .is_empty());
    }
}
