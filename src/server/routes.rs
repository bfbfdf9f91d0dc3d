use actix_web::web::{self, Data, Json};
use actix_web::{get, post, HttpResponse, Responder};
use serde::Deserialize;

use super::AppState;
use crate::common::error::ServerError;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Missing and blank questions are rejected alike.
    #[serde(default)]
    question: String,
    /// Accepted signed so that a negative index reaches the range check
    /// instead of failing deserialization.
    context_index: Option<i64>,
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json("bert-qa-server")
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json("healthy")
}

#[post("/answer")]
pub async fn answer(
    state: Data<AppState>,
    request: Json<AnswerRequest>,
) -> Result<HttpResponse, ServerError> {
    let AnswerRequest {
        question,
        context_index,
    } = request.into_inner();

    if question.trim().is_empty() {
        return Err(ServerError::ValidationError(
            "Question is required".to_string(),
        ));
    }
    let context = match context_index {
        Some(index) => state.contexts.select(index)?.to_owned(),
        None => state.contexts.default_passage().to_owned(),
    };

    let state = Data::clone(&state);
    let extracted = web::block(move || {
        let qa = state
            .qa
            .lock()
            .map_err(|_| ServerError::InferenceError("model pipeline lock poisoned".to_string()))?;
        qa.answer(&question, &context)
    })
    .await
    .map_err(|error| ServerError::InferenceError(error.to_string()))??;

    Ok(HttpResponse::Ok().json(extracted))
}
