//! Scripted completion client for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::client::CompletionClient;
use super::error::ScoringError;

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail,
    Hang(Duration),
}

/// In-memory completion client with a scripted reply and a call counter.
pub struct MockCompletionClient {
    reply: Mutex<MockReply>,
    call_count: Arc<AtomicUsize>,
}

impl MockCompletionClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Mutex::new(MockReply::Text(text.into())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Mutex::new(MockReply::Fail),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn hanging(delay: Duration) -> Self {
        Self {
            reply: Mutex::new(MockReply::Hang(delay)),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        _model: &str,
        _system: &str,
        _prompt: &str,
    ) -> Result<String, ScoringError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let reply = self.reply.lock().clone();
        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail => Err(ScoringError::Completion {
                message: "scripted failure".to_string(),
            }),
            MockReply::Hang(delay) => {
                tokio::time::sleep(delay).await;
                Err(ScoringError::Completion {
                    message: "scripted hang elapsed".to_string(),
                })
            }
        }
    }
}
