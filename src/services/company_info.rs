use std::{sync::Arc, time::Duration};

use crate::{
    dal::company_cache::CompanyCache,
    domain::{
        company_info::{
            extract_company_details, guess_homepage, is_homepage_candidate, sibling_tld,
            CompanyInfo,
        },
        html_tag::{extract_anchor_tags, find_about_page},
    },
};

use super::{
    droid::PageBrowser,
    search::{build_homepage_search_query, LinkSearch},
};

/// Looks up basic facts about a company from its own website. Every result,
/// including the placeholder ones, is cached for good.
pub struct CompanyInfoService {
    search: Arc<dyn LinkSearch>,
    browser: Arc<dyn PageBrowser>,
    cache: Arc<CompanyCache>,
    blacklist: Vec<String>,
    page_load_timeout: Duration,
}

impl CompanyInfoService {
    pub fn new(
        search: Arc<dyn LinkSearch>,
        browser: Arc<dyn PageBrowser>,
        cache: Arc<CompanyCache>,
        blacklist: Vec<String>,
        page_load_timeout: Duration,
    ) -> Self {
        CompanyInfoService {
            search,
            browser,
            cache,
            blacklist,
            page_load_timeout,
        }
    }

    pub async fn get_company_info(&self, company: &str) -> CompanyInfo {
        if let Some(info) = self.cache.get(company).await {
            log::info!("Company info cache hit for {}", company);
            return info;
        }

        let info = self.lookup(company).await;

        if let Err(e) = self.cache.insert(company, info.clone()).await {
            log::error!("Failed to persist company info for {}: {}", company, e);
        }

        info
    }

    async fn find_homepage(&self, company: &str) -> String {
        let query = build_homepage_search_query(company, &self.blacklist);

        let links = match self.search.search(&query).await {
            Ok(links) => links,
            Err(e) => {
                log::warn!("Homepage search failed for {}: {}", company, e);
                vec![]
            }
        };

        links
            .into_iter()
            .find(|link| is_homepage_candidate(link, &self.blacklist))
            .unwrap_or_else(|| guess_homepage(company))
    }

    /// Returns the url that actually loaded together with its markup.
    async fn load_homepage(&self, homepage: &str) -> Option<(String, String)> {
        match self.browser.render(homepage, Some(self.page_load_timeout)).await {
            Ok(html) => return Some((homepage.to_string(), html)),
            Err(e) => log::warn!("Failed to load {}, trying .in alternative: {}", homepage, e),
        }

        let fallback = sibling_tld(homepage)?;
        match self.browser.render(&fallback, Some(self.page_load_timeout)).await {
            Ok(html) => Some((fallback, html)),
            Err(e) => {
                log::warn!("Failed to load {}: {}", fallback, e);
                None
            }
        }
    }

    async fn lookup(&self, company: &str) -> CompanyInfo {
        let homepage = self.find_homepage(company).await;

        let Some((website, homepage_html)) = self.load_homepage(&homepage).await else {
            log::error!("Website unreachable for {}", company);
            return CompanyInfo::unreachable(company, &homepage);
        };

        let anchors = extract_anchor_tags(&homepage_html, &website);
        let about_page = find_about_page(&anchors, &website);

        let about_html = match about_page == website {
            true => homepage_html,
            false => match self
                .browser
                .render(&about_page, Some(self.page_load_timeout))
                .await
            {
                Ok(html) => html,
                Err(e) => {
                    log::error!("Error fetching company info from {}: {}", about_page, e);
                    return CompanyInfo::extraction_failed(company, &website, &about_page);
                }
            },
        };

        let details = extract_company_details(&about_html);
        CompanyInfo::from_details(company, &website, &about_page, details)
    }
}
