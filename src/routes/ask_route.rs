use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    dal::StoreError,
    services::{AskError, Analyzer, ANSWER_FAILED_MESSAGE},
};

#[derive(Deserialize)]
struct AskBody {
    question: Option<String>,
    company: Option<String>,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

/// The field as sent, unless it is missing or only whitespace.
fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|f| !f.trim().is_empty())
}

#[post("/ask")]
async fn ask(analyzer: web::Data<Analyzer>, body: web::Json<AskBody>) -> HttpResponse {
    let (Some(question), Some(company)) = (non_blank(&body.question), non_blank(&body.company))
    else {
        return HttpResponse::BadRequest()
            .body("❌ Both \"question\" and \"company\" are required in the request body.");
    };

    let answer = match analyzer.ask(question, company).await {
        Ok(answer) => answer,
        Err(AskError::Llm(e)) => {
            log::error!("QA model error for {}: {}", company, e);
            ANSWER_FAILED_MESSAGE.to_string()
        }
        Err(AskError::Store(StoreError::InvalidCompanyName(_))) => {
            return HttpResponse::BadRequest().body("❌ Company name is not valid.")
        }
        Err(e) => {
            log::error!("QA error for {}: {}", company, e);
            return HttpResponse::InternalServerError()
                .body("Something went wrong answering your question.");
        }
    };

    HttpResponse::Ok().json(AskResponse { answer })
}
