use std::sync::Arc;

use crate::image_client::ImageProvider;
use crate::llm_client::TextProvider;
use crate::sites::store::SiteStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every collaborator sits behind a trait so tests can swap in mocks.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
    pub image_provider: Arc<dyn ImageProvider>,
    /// Persistence sink. Generation submits to it and never waits.
    pub sites: Arc<dyn SiteStore>,
}
