use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub api_keys: ApiKeys,
    pub search: SearchSettings,
    pub scraping: ScrapingSettings,
    pub storage: StorageSettings,
    pub llm: LlmSettings,
    pub browser: BrowserSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub public_dir: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiKeys {
    pub serpapi: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    pub base_url: String,
    pub engine: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub num_results: u8,
    pub review_domains: Vec<String>,
    pub blacklist_domains: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScrapingSettings {
    pub user_agent: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_fragment_len: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub review_limit: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub read_cap: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub reviews_dir: PathBuf,
    pub company_cache_path: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BrowserSettings {
    pub webdriver_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_load_timeout_secs: u64,
}

impl BrowserSettings {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("No working directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
