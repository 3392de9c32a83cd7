use crate::dtos::{ChatMessage, ChatResponse};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use std::time::Instant;
use validator::Validate;

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatMessage>,
) -> Result<Json<ChatResponse>, AppError> {
    request.validate()?;
    let started = Instant::now();

    let mut documents = Vec::new();
    for document_id in request.context_documents.iter().flatten() {
        let document = state.store.get(document_id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Document {} not found", document_id))
        })?;
        documents.push(document);
    }

    let answer = state
        .chat
        .respond(&request.session_id, &request.message, &documents)
        .await
        .map_err(|e| {
            tracing::error!(session_id = %request.session_id, error = %e, "Chat engine failed");
            e
        })?;

    let confidence_score = if answer.confidence_score.is_nan() {
        0.0
    } else {
        answer.confidence_score.clamp(0.0, 1.0)
    };
    let processing_time = started.elapsed().as_secs_f64();

    tracing::info!(
        session_id = %request.session_id,
        context_documents = documents.len(),
        sources = answer.sources.len(),
        processing_time,
        "Chat message answered"
    );

    Ok(Json(ChatResponse {
        response: answer.response,
        sources: answer.sources,
        confidence_score,
        processing_time,
    }))
}
