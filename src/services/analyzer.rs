use std::sync::Arc;

use thiserror::Error;

use crate::{
    dal::{review_store::ReviewStore, StoreError},
    domain::company_info::CompanyInfo,
};

use super::{
    company_info::CompanyInfoService,
    ollama_client::{LlmError, TextGenerator},
    review_scraper::ReviewScraper,
    search::{get_review_links, LinkSearch, SearchError},
    synthesis::{answer_question, summarize_reviews, AskError},
};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("No review links found")]
    NoReviewLinks,

    #[error("No reviews extracted")]
    NoReviewsExtracted,

    #[error("Review search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Review store failed: {0}")]
    Store(#[from] StoreError),

    #[error("Summary generation failed: {0}")]
    Llm(#[from] LlmError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub company: String,
    pub summary: String,
    pub company_info: CompanyInfo,
}

/// Runs the review pipeline for one company: stored reviews when present,
/// otherwise search, scrape and store, then summarize.
pub struct Analyzer {
    store: Arc<ReviewStore>,
    search: Arc<dyn LinkSearch>,
    scraper: ReviewScraper,
    generator: Arc<dyn TextGenerator>,
    company_info: CompanyInfoService,
    review_domains: Vec<String>,
    review_limit: usize,
}

impl Analyzer {
    pub fn new(
        store: Arc<ReviewStore>,
        search: Arc<dyn LinkSearch>,
        scraper: ReviewScraper,
        generator: Arc<dyn TextGenerator>,
        company_info: CompanyInfoService,
        review_domains: Vec<String>,
        review_limit: usize,
    ) -> Self {
        Analyzer {
            store,
            search,
            scraper,
            generator,
            company_info,
            review_domains,
            review_limit,
        }
    }

    pub async fn analyze(&self, company: &str) -> Result<Analysis, AnalyzeError> {
        let reviews = match self.store.read(company).await? {
            Some(stored) => {
                log::info!("Reviews found on disk for {}, loading from file", company);
                stored.into_iter().take(self.review_limit).collect()
            }
            None => {
                log::info!("No stored reviews for {}, scraping", company);
                self.scrape(company).await?
            }
        };

        let summary = summarize_reviews(self.generator.as_ref(), &reviews, company).await?;
        let company_info = self.company_info.get_company_info(company).await;

        Ok(Analysis {
            company: company.to_string(),
            summary,
            company_info,
        })
    }

    async fn scrape(&self, company: &str) -> Result<Vec<String>, AnalyzeError> {
        let links =
            get_review_links(self.search.as_ref(), company, None, &self.review_domains).await?;
        if links.is_empty() {
            return Err(AnalyzeError::NoReviewLinks);
        }

        let mut reviews = vec![];
        for url in links.iter() {
            reviews.extend(self.scraper.scrape_reviews(url, company).await);
        }
        reviews.truncate(self.review_limit);

        if reviews.is_empty() {
            return Err(AnalyzeError::NoReviewsExtracted);
        }

        self.store.save(company, &reviews).await?;

        Ok(reviews)
    }

    pub async fn ask(&self, question: &str, company: &str) -> Result<String, AskError> {
        answer_question(self.generator.as_ref(), &self.store, question, company).await
    }
}
