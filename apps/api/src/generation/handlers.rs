//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_content;
use crate::generation::image::generate_image;
use crate::models::{GeneratedPageContent, GenerationMode, ProjectProfile, TemplateChoice};
use crate::sites::store::submit_site;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateSiteResponse {
    pub profile_id: Uuid,
    pub mode: GenerationMode,
    pub template: TemplateChoice,
    pub content: GeneratedPageContent,
}

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub image: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sites/generate
///
/// Generates page content for the profile, submits it for storage without
/// waiting, and returns the content.
pub async fn handle_generate_site(
    State(state): State<AppState>,
    Json(profile): Json<ProjectProfile>,
) -> Result<Json<GenerateSiteResponse>, AppError> {
    if profile.company.name.trim().is_empty() {
        return Err(AppError::Validation(
            "company.name cannot be empty".to_string(),
        ));
    }
    if profile.seo.main_keyword.trim().is_empty() {
        return Err(AppError::Validation(
            "seo.mainKeyword cannot be empty".to_string(),
        ));
    }

    let content = generate_content(&profile, state.text_provider.as_ref()).await?;

    // Fire and forget: storage failures are logged by the task, never returned.
    submit_site(state.sites.clone(), &profile, &content);

    Ok(Json(GenerateSiteResponse {
        profile_id: profile.id,
        mode: profile.settings.mode,
        template: profile.settings.template,
        content,
    }))
}

/// POST /api/v1/images/generate
pub async fn handle_generate_image(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let image = generate_image(
        &request.prompt,
        &request.api_key,
        state.image_provider.as_ref(),
    )
    .await?;

    Ok(Json(GenerateImageResponse { image }))
}
