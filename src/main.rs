use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use repute::{
    configuration::get_configuration,
    dal::{company_cache::CompanyCache, review_store::ReviewStore},
    services::{
        Analyzer, CompanyInfoService, Droid, HttpFetcher, LinkSearch, OllamaClient, PageBrowser,
        PageFetcher, RenderedFetcher, ReviewScraper, SerpApiClient, TextGenerator,
    },
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    if configuration.api_keys.serpapi.is_empty() {
        log::warn!("No SerpApi key configured, review search will fail");
    }

    let store = ReviewStore::new(
        &configuration.storage.reviews_dir,
        configuration.scraping.read_cap,
    )
    .await
    .context("Failed to prepare reviews directory.")?;
    let cache = CompanyCache::load(&configuration.storage.company_cache_path).await;

    let search: Arc<dyn LinkSearch> = Arc::new(SerpApiClient::new(
        &configuration.search,
        configuration.api_keys.serpapi.clone(),
    ));
    let browser: Arc<dyn PageBrowser> =
        Arc::new(Droid::new(&configuration.browser.webdriver_url));
    let generator: Arc<dyn TextGenerator> = Arc::new(OllamaClient::new(&configuration.llm));

    let fetchers: Vec<Arc<dyn PageFetcher>> = vec![
        Arc::new(HttpFetcher::new(&configuration.scraping.user_agent)),
        Arc::new(RenderedFetcher::new(browser.clone())),
    ];
    let scraper = ReviewScraper::new(fetchers, configuration.scraping.min_fragment_len);

    let company_info = CompanyInfoService::new(
        search.clone(),
        browser,
        Arc::new(cache),
        configuration.search.blacklist_domains.clone(),
        configuration.browser.page_load_timeout(),
    );

    let analyzer = Analyzer::new(
        Arc::new(store),
        search,
        scraper,
        generator,
        company_info,
        configuration.search.review_domains.clone(),
        configuration.scraping.review_limit,
    );

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Server running at http://{}", address);

    run(listener, analyzer, configuration.application.public_dir)?.await?;

    Ok(())
}
