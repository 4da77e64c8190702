//! Axum route handlers for the Extraction API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::ExtractionResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub description: String,
}

/// POST /api/v1/extract
///
/// Extracts the skillset and job level from one job description (HTML or plain text).
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractionResult>, AppError> {
    let description = request.description.trim();
    if description.is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let result = state.extractor.extract(description).await?;

    Ok(Json(result))
}
