//! Axum route handlers for stored sites.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::site::SiteRow;
use crate::state::AppState;

/// GET /api/v1/sites/:id
pub async fn handle_get_site(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SiteRow>, AppError> {
    let site = state
        .sites
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Site {id} not found")))?;
    Ok(Json(site))
}
