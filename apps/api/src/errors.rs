use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::generator::GenerationError;
use crate::image_client::ImageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Provider error: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    #[error("Unexpected provider response: {0}")]
    UnexpectedProviderResponse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::MissingCredential => {
                AppError::MissingCredential("Anthropic API key is required in BYOK mode".to_string())
            }
            GenerationError::UnexpectedResponse(msg) => AppError::UnexpectedProviderResponse(msg),
            GenerationError::Provider(e) => provider_error(e.status(), &e),
        }
    }
}

impl From<ImageError> for AppError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::MissingCredential => {
                AppError::MissingCredential("Replicate API key is required".to_string())
            }
            ImageError::EmptyOutput => AppError::UnexpectedProviderResponse(e.to_string()),
            ImageError::Http(ref inner) => provider_error(inner.status().map(|s| s.as_u16()), &e),
            ImageError::Api { status, .. } => provider_error(Some(status), &e),
            ImageError::Failed { .. } => provider_error(None, &e),
        }
    }
}

fn provider_error(status: Option<u16>, source: &dyn std::fmt::Display) -> AppError {
    AppError::Provider {
        status,
        message: source.to_string(),
    }
}

/// User-facing explanation for an upstream provider status.
fn provider_message(status: Option<u16>) -> &'static str {
    match status {
        Some(401) | Some(403) => "The provider rejected the API key",
        Some(402) => "The provider account has insufficient credit",
        Some(429) => "The provider rate limit was reached, try again later",
        Some(s) if s >= 500 => "The provider is unavailable, try again later",
        _ => "The provider request failed",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingCredential(msg) => {
                (StatusCode::BAD_REQUEST, "MISSING_CREDENTIAL", msg.clone())
            }
            AppError::Provider { status, message } => {
                tracing::warn!("Provider error: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    provider_message(*status).to_string(),
                )
            }
            AppError::UnexpectedProviderResponse(msg) => {
                tracing::error!("Unexpected provider response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UNEXPECTED_PROVIDER_RESPONSE",
                    "The provider returned a response that could not be interpreted".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;

    #[test]
    fn test_missing_credential_is_bad_request() {
        let response = AppError::from(GenerationError::MissingCredential).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unexpected_response_is_bad_gateway() {
        let err = AppError::from(GenerationError::UnexpectedResponse("tool_use".to_string()));
        assert!(matches!(err, AppError::UnexpectedProviderResponse(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_provider_error_keeps_upstream_status() {
        let err = AppError::from(GenerationError::Provider(LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        }));
        match &err {
            AppError::Provider { status, .. } => assert_eq!(*status, Some(401)),
            other => panic!("expected Provider, got {other:?}"),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_provider_messages() {
        assert_eq!(provider_message(Some(401)), "The provider rejected the API key");
        assert!(provider_message(Some(429)).contains("rate limit"));
        assert!(provider_message(Some(503)).contains("unavailable"));
        assert_eq!(provider_message(None), "The provider request failed");
    }

    #[test]
    fn test_image_errors_map() {
        assert!(matches!(
            AppError::from(ImageError::MissingCredential),
            AppError::MissingCredential(_)
        ));
        assert!(matches!(
            AppError::from(ImageError::EmptyOutput),
            AppError::UnexpectedProviderResponse(_)
        ));
        assert!(matches!(
            AppError::from(ImageError::Api {
                status: 402,
                message: "billing".to_string()
            }),
            AppError::Provider {
                status: Some(402),
                ..
            }
        ));
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("Site x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
