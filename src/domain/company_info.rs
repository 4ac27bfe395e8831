use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::html_tag::visible_text;

const DESCRIPTION_LEN: usize = 500;
const UNREACHABLE_DESCRIPTION: &str = "Website could not be reached.";
const EXTRACTION_FAILED_DESCRIPTION: &str = "Failed to extract company info from website.";

static CEO_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Founder\s+and\s+CEO").expect("valid regex"));
// Some about pages render a `management___header` label right before the year.
static FOUNDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Founded|Established|management___header)[:\s]+(\d{4})")
        .expect("valid regex")
});
static HEADQUARTERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Headquarters[:\s]+([A-Z][a-zA-Z,\s]+)").expect("valid regex")
});
static INDUSTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Industry[:\s]+([A-Za-z\s]+)").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub website: String,
    pub about_page: String,
    pub ceo: Option<String>,
    pub founded: Option<String>,
    pub headquarters: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
}

impl CompanyInfo {
    pub fn from_details(
        name: &str,
        website: &str,
        about_page: &str,
        details: CompanyDetails,
    ) -> Self {
        CompanyInfo {
            name: name.to_string(),
            website: website.to_string(),
            about_page: about_page.to_string(),
            ceo: details.ceo,
            founded: details.founded,
            headquarters: details.headquarters,
            industry: details.industry,
            description: Some(details.description),
        }
    }

    pub fn unreachable(name: &str, website: &str) -> Self {
        Self::placeholder(name, website, website, UNREACHABLE_DESCRIPTION)
    }

    pub fn extraction_failed(name: &str, website: &str, about_page: &str) -> Self {
        Self::placeholder(name, website, about_page, EXTRACTION_FAILED_DESCRIPTION)
    }

    fn placeholder(name: &str, website: &str, about_page: &str, description: &str) -> Self {
        CompanyInfo {
            name: name.to_string(),
            website: website.to_string(),
            about_page: about_page.to_string(),
            ceo: None,
            founded: None,
            headquarters: None,
            industry: None,
            description: Some(description.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetails {
    pub ceo: Option<String>,
    pub founded: Option<String>,
    pub headquarters: Option<String>,
    pub industry: Option<String>,
    pub description: String,
}

/// `https://www.acme.com` for "Acme", used when search turns up no homepage.
pub fn guess_homepage(company: &str) -> String {
    let squashed: String = company
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .concat();
    format!("https://www.{}.com", squashed)
}

/// Same url with the first `.com` swapped for `.in`.
pub fn sibling_tld(url: &str) -> Option<String> {
    url.contains(".com").then(|| url.replacen(".com", ".in", 1))
}

pub fn is_homepage_candidate(link: &str, blacklist: &[String]) -> bool {
    (link.contains(".com") || link.contains(".in"))
        && !blacklist.iter().any(|bad| link.contains(bad.as_str()))
}

fn capture_first(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|m| !m.is_empty())
}

fn find_ceo(document: &Html) -> Option<String> {
    let div_selector = Selector::parse("div").ok()?;
    let name_selector = Selector::parse("p, h1, h2, h3, h4, strong").ok()?;

    // Last matching container wins, which is usually the innermost one.
    document
        .select(&div_selector)
        .filter(|div| CEO_MARKER_RE.is_match(&visible_text(*div)))
        .filter_map(|div| {
            let name = div
                .select(&name_selector)
                .next()
                .map(|tag| tag.text().collect::<String>().trim().to_string())?;
            (!name.is_empty()).then_some(name)
        })
        .last()
}

pub fn extract_company_details(html: &str) -> CompanyDetails {
    let document = Html::parse_document(html);
    let text = visible_text(document.root_element());
    let collapsed = text.split_whitespace().collect::<Vec<&str>>().join(" ");
    let description = format!(
        "{}...",
        collapsed.chars().take(DESCRIPTION_LEN).collect::<String>()
    );

    CompanyDetails {
        ceo: find_ceo(&document),
        founded: capture_first(&FOUNDED_RE, &text),
        headquarters: capture_first(&HEADQUARTERS_RE, &text),
        industry: capture_first(&INDUSTRY_RE, &text),
        description,
    }
}
