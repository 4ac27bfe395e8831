pub mod analyzer;
pub mod company_info;
pub mod droid;
pub mod fetcher;
pub mod ollama_client;
pub mod review_scraper;
pub mod search;
pub mod synthesis;

pub use analyzer::*;
pub use company_info::*;
pub use droid::*;
pub use fetcher::*;
pub use ollama_client::*;
pub use review_scraper::*;
pub use search::*;
pub use synthesis::*;
