use thiserror::Error;

use crate::dal::{review_store::ReviewStore, StoreError};

use super::ollama_client::{LlmError, TextGenerator};

pub const NO_REVIEWS_MESSAGE: &str = "⚠️ No reviews found. Please run /analyze first.";
pub const ANSWER_FAILED_MESSAGE: &str = "❌ Failed to get a response from the model.";

#[derive(Debug, Error)]
pub enum AskError {
    #[error("Failed to read reviews: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to generate answer: {0}")]
    Llm(#[from] LlmError),
}

pub fn build_summary_prompt(reviews: &[String], company: &str) -> String {
    format!(
        "Summarize these employee reviews for \"{}\":\n\n{}",
        company,
        reviews.join("\n\n")
    )
}

pub fn build_question_prompt(reviews: &[String], question: &str, company: &str) -> String {
    format!(
        r#"
You are a helpful assistant. Use the employee reviews of "{}" below to answer the user's question.

Reviews:
{}

Question: {}
Answer:
"#,
        company,
        reviews.join("\n"),
        question
    )
}

/// Asks the model for a prose summary. An empty `reviews` still goes to the
/// model.
pub async fn summarize_reviews(
    generator: &dyn TextGenerator,
    reviews: &[String],
    company: &str,
) -> Result<String, LlmError> {
    let prompt = build_summary_prompt(reviews, company);
    let summary = generator.generate(&prompt).await?;
    Ok(summary.trim().to_string())
}

/// Answers `question` from the company's stored reviews, or returns
/// [`NO_REVIEWS_MESSAGE`] when nothing has been stored for it yet.
pub async fn answer_question(
    generator: &dyn TextGenerator,
    store: &ReviewStore,
    question: &str,
    company: &str,
) -> Result<String, AskError> {
    let Some(reviews) = store.read(company).await? else {
        log::info!("No stored reviews for {}, cannot answer", company);
        return Ok(NO_REVIEWS_MESSAGE.to_string());
    };

    let prompt = build_question_prompt(&reviews, question, company);
    let answer = generator.generate(&prompt).await?;
    Ok(answer.trim().to_string())
}
