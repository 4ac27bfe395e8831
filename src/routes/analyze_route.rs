use actix_web::{get, http::header::ContentType, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{
    dal::StoreError,
    domain::company_info::CompanyInfo,
    services::{Analysis, AnalyzeError, Analyzer},
};

#[derive(Deserialize)]
struct AnalyzeQuery {
    company: Option<String>,
}

struct Fact {
    label: &'static str,
    value: String,
}

#[derive(Template)]
#[template(path = "analysis.html")]
struct AnalysisTemplate<'a> {
    company: &'a str,
    summary: &'a str,
    facts: Vec<Fact>,
    website: &'a str,
}

fn facts_from(info: &CompanyInfo) -> Vec<Fact> {
    [
        ("Name", Some(&info.name)),
        ("CEO", info.ceo.as_ref()),
        ("Founded", info.founded.as_ref()),
        ("Headquarters", info.headquarters.as_ref()),
        ("About", info.description.as_ref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value.filter(|v| !v.is_empty()).map(|v| Fact {
            label,
            value: v.to_string(),
        })
    })
    .collect()
}

fn render(analysis: &Analysis) -> Result<String, askama::Error> {
    AnalysisTemplate {
        company: &analysis.company,
        summary: &analysis.summary,
        facts: facts_from(&analysis.company_info),
        website: &analysis.company_info.website,
    }
    .render()
}

#[get("/analyze")]
async fn analyze(analyzer: web::Data<Analyzer>, query: web::Query<AnalyzeQuery>) -> HttpResponse {
    let company = query.company.as_deref().map(str::trim).unwrap_or_default();
    if company.is_empty() {
        return HttpResponse::BadRequest()
            .body("❌ Company name is required as a query parameter.");
    }

    let analysis = match analyzer.analyze(company).await {
        Ok(analysis) => analysis,
        Err(AnalyzeError::NoReviewLinks) => {
            return HttpResponse::NotFound().body("❌ No review links found.")
        }
        Err(AnalyzeError::NoReviewsExtracted) => {
            return HttpResponse::NotFound().body("❌ No reviews extracted.")
        }
        Err(AnalyzeError::Store(StoreError::InvalidCompanyName(_))) => {
            return HttpResponse::BadRequest().body("❌ Company name is not valid.")
        }
        Err(e) => {
            log::error!("Analyze failed for {}: {}", company, e);
            return HttpResponse::InternalServerError().body("Something went wrong.");
        }
    };

    match render(&analysis) {
        Ok(html) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html),
        Err(e) => {
            log::error!("Failed to render analysis for {}: {}", company, e);
            HttpResponse::InternalServerError().body("Something went wrong.")
        }
    }
}
