pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers::{handle_generate_image, handle_generate_site};
use crate::sites::handlers::handle_get_site;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/sites/generate", post(handle_generate_site))
        .route("/api/v1/images/generate", post(handle_generate_image))
        // Stored sites
        .route("/api/v1/sites/:id", get(handle_get_site))
        .with_state(state)
}
