//! In-process doubles for the provider and storage traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use uuid::Uuid;

use crate::image_client::{ImageError, ImageProvider, ImageRequest};
use crate::llm_client::{ContentBlock, LlmError, LlmResponse, TextProvider};
use crate::models::site::SiteRow;
use crate::sites::store::{NewSite, SiteStore};

/// What the mock text provider answers with.
pub enum MockReply {
    /// A single text block.
    Text(String),
    /// A single non-text block of the given kind.
    Block(&'static str),
    /// A response with no content blocks.
    Empty,
    /// An API error with this HTTP status.
    Status(u16),
    /// A success status whose body is not a Messages response.
    Undecodable,
}

pub struct MockTextProvider {
    reply: MockReply,
    calls: AtomicUsize,
    last_api_key: Mutex<Option<String>>,
}

impl MockTextProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_api_key: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn complete(&self, api_key: &str, _prompt: &str) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_api_key.lock().unwrap() = Some(api_key.to_string());

        match &self.reply {
            MockReply::Text(text) => Ok(LlmResponse::text_block(text)),
            MockReply::Block(kind) => Ok(LlmResponse {
                content: vec![ContentBlock {
                    block_type: kind.to_string(),
                    text: None,
                }],
                usage: None,
            }),
            MockReply::Empty => Ok(LlmResponse {
                content: vec![],
                usage: None,
            }),
            MockReply::Status(status) => Err(LlmError::Api {
                status: *status,
                message: "mock provider error".to_string(),
            }),
            MockReply::Undecodable => Err(LlmError::Decode(
                serde_json::from_str::<LlmResponse>(r#"{"content":"oops"}"#).unwrap_err(),
            )),
        }
    }
}

/// Owned copy of the last `ImageRequest` plus the key it was sent with.
#[derive(Debug, Clone)]
pub struct RecordedImageRequest {
    pub api_key: String,
    pub version: String,
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

pub struct MockImageProvider {
    outputs: Vec<String>,
    fail_status: Option<u16>,
    calls: AtomicUsize,
    last_request: Mutex<Option<RecordedImageRequest>>,
}

impl MockImageProvider {
    pub fn returning(outputs: Vec<&str>) -> Self {
        Self {
            outputs: outputs.into_iter().map(String::from).collect(),
            fail_status: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::returning(vec![])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedImageRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(
        &self,
        api_key: &str,
        request: &ImageRequest<'_>,
    ) -> Result<Vec<String>, ImageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(RecordedImageRequest {
            api_key: api_key.to_string(),
            version: request.version.to_string(),
            prompt: request.prompt.to_string(),
            width: request.width,
            height: request.height,
        });

        match self.fail_status {
            Some(status) => Err(ImageError::Api {
                status,
                message: "mock provider error".to_string(),
            }),
            None => Ok(self.outputs.clone()),
        }
    }
}

#[derive(Default)]
pub struct InMemorySiteStore {
    sites: Mutex<Vec<SiteRow>>,
    fail: bool,
}

impl InMemorySiteStore {
    pub fn failing() -> Self {
        Self {
            sites: Mutex::new(vec![]),
            fail: true,
        }
    }

    pub fn saved(&self) -> Vec<SiteRow> {
        self.sites.lock().unwrap().clone()
    }
}

#[async_trait]
impl SiteStore for InMemorySiteStore {
    async fn save(&self, site: NewSite) -> Result<SiteRow> {
        if self.fail {
            return Err(anyhow!("storage unavailable"));
        }
        let row = SiteRow {
            id: Uuid::new_v4(),
            company_name: site.profile.company.name.clone(),
            profile_json: serde_json::to_value(&site.profile)?,
            content_json: serde_json::to_value(&site.content)?,
            created_at: Utc::now(),
        };
        self.sites.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<SiteRow>> {
        Ok(self.saved().into_iter().find(|s| s.id == id))
    }
}

/// Minimal HTTP/1.1 server on a random local port. Answers each connection
/// with the next canned `(status, body)`; the last one repeats.
pub struct HttpStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl HttpStub {
    pub async fn start(responses: Vec<(u16, &str)>) -> Self {
        assert!(!responses.is_empty(), "stub needs at least one response");
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        tokio::spawn(async move {
            let mut served = 0usize;
            while let Ok((mut socket, _)) = listener.accept().await {
                let request_line = read_request(&mut socket).await;
                seen.lock().unwrap().push(request_line);

                let (status, body) = &responses[served.min(responses.len() - 1)];
                served += 1;
                let reply = format!(
                    "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    /// Request lines received so far, e.g. `"GET /v1/predictions/p1 HTTP/1.1"`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Reads one full request (headers plus `content-length` body) and returns
/// its request line.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let body_len = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return head.lines().next().unwrap_or_default().to_string();
            }
        }
    }
    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
