/// Image Client — Replicate predictions API.
///
/// Mirrors `llm_client`: the client holds no credential, the caller passes the
/// end user's own Replicate token on every call.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::debug;

pub const DEFAULT_REPLICATE_URL: &str = "https://api.replicate.com";
const PREDICTIONS_PATH: &str = "/v1/predictions";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Replicate API key is missing")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prediction {status}: {detail}")]
    Failed { status: String, detail: String },

    #[error("Image provider returned no image")]
    EmptyOutput,
}

/// A fixed-shape image request: model version, prompt and output size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest<'a> {
    pub version: &'a str,
    pub prompt: &'a str,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    id: Option<String>,
    status: String,
    #[serde(default)]
    output: Option<PredictionOutput>,
    #[serde(default)]
    error: Option<String>,
}

/// Some models return a single URL, most return a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionOutput {
    Many(Vec<String>),
    One(String),
}

impl PredictionOutput {
    fn into_vec(self) -> Vec<String> {
        match self {
            PredictionOutput::Many(urls) => urls,
            PredictionOutput::One(url) => vec![url],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReplicateError {
    detail: String,
}

/// Anything that turns an `ImageRequest` into an ordered list of image references.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        request: &ImageRequest<'_>,
    ) -> Result<Vec<String>, ImageError>;
}

#[derive(Clone)]
pub struct ReplicateClient {
    client: Client,
    base_url: String,
    /// Upper bound for one prediction, initial request plus polling.
    timeout: Duration,
    poll_interval: Duration,
}

impl ReplicateClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ImageError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    #[cfg(test)]
    fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn predictions_url(&self) -> String {
        format!("{}{}", self.base_url, PREDICTIONS_PATH)
    }

    fn prediction_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, PREDICTIONS_PATH, id)
    }

    /// Sends a predictions request and decodes the prediction it returns.
    async fn send(&self, request: RequestBuilder, api_key: &str) -> Result<Prediction, ImageError> {
        let response = request.bearer_auth(api_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ReplicateError>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ImageProvider for ReplicateClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &ImageRequest<'_>,
    ) -> Result<Vec<String>, ImageError> {
        let body = PredictionRequest {
            version: request.version,
            input: PredictionInput {
                prompt: request.prompt,
                width: request.width,
                height: request.height,
            },
        };
        let deadline = Instant::now() + self.timeout;

        // `Prefer: wait` holds the connection for a while; slow or cold runs
        // come back unfinished and are polled until they settle.
        let mut prediction = self
            .send(
                self.client
                    .post(self.predictions_url())
                    .header("Prefer", "wait")
                    .json(&body),
                api_key,
            )
            .await?;

        while !is_terminal(&prediction.status) {
            let id = match prediction.id.as_deref() {
                Some(id) => id.to_string(),
                None => {
                    return Err(ImageError::Failed {
                        status: prediction.status,
                        detail: "unfinished prediction has no id to poll".to_string(),
                    })
                }
            };
            if Instant::now() + self.poll_interval > deadline {
                return Err(ImageError::Failed {
                    status: prediction.status,
                    detail: format!("prediction {id} did not finish within {:?}", self.timeout),
                });
            }

            debug!("Replicate prediction {id} is {}, polling", prediction.status);
            sleep(self.poll_interval).await;
            prediction = self
                .send(self.client.get(self.prediction_url(&id)), api_key)
                .await?;
        }

        prediction_outputs(prediction)
    }
}

fn is_terminal(status: &str) -> bool {
    matches!(status, "succeeded" | "failed" | "canceled")
}

fn prediction_outputs(prediction: Prediction) -> Result<Vec<String>, ImageError> {
    if prediction.status != "succeeded" {
        return Err(ImageError::Failed {
            detail: prediction
                .error
                .unwrap_or_else(|| "prediction did not finish".to_string()),
            status: prediction.status,
        });
    }

    debug!(
        "Replicate prediction {} succeeded",
        prediction.id.as_deref().unwrap_or("<unknown>")
    );

    Ok(prediction
        .output
        .map(PredictionOutput::into_vec)
        .unwrap_or_default())
}
