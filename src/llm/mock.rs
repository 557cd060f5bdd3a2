//! Test double for [`ModelClient`]: canned replies, no network.

use crate::llm::traits::ModelClient;
use crate::llm::types::{GenerateRequest, ModelError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

enum Reply {
    Text(String),
    Status(u16),
    Empty,
}

/// Replies with the same canned answer to every request and counts calls.
pub struct MockClient {
    reply: Reply,
    delay: Duration,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockClient {
    /// Mock that answers every prompt with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    /// Mock whose every call fails with an HTTP status.
    pub fn failing(status: u16) -> Self {
        Self::with_reply(Reply::Status(status))
    }

    /// Mock whose every call comes back without text.
    pub fn empty() -> Self {
        Self::with_reply(Reply::Empty)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Hold every reply back for `delay`, like a slow network.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for MockClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(status) => Err(ModelError::Status {
                status: *status,
                body: "mock failure".to_string(),
            }),
            Reply::Empty => Err(ModelError::EmptyResponse),
        }
    }

    fn backend_name(&self) -> &'static str {
        "Mock"
    }
}
