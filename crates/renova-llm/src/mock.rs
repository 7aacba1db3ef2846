//! Pre-programmed generator for deterministic testing without API calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::client::{GenerationError, Generator};

pub enum MockResponse {
    /// Return this text.
    Text(String),
    /// Fail with this error.
    Error(GenerationError),
}

/// Mock generator that returns pre-programmed responses in sequence and
/// counts calls. Extra calls past the end repeat the last response.
pub struct MockGenerator {
    responses: Vec<MockResponse>,
    call_count: AtomicUsize,
}

impl MockGenerator {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(vec![MockResponse::Text(text.to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GenerationError> {
        let call = self.call_count.fetch_add(1, Ordering::Relaxed);
        let index = call.min(self.responses.len().saturating_sub(1));
        match self.responses.get(index) {
            Some(MockResponse::Text(text)) => Ok(text.clone()),
            Some(MockResponse::Error(e)) => Err(e.clone()),
            None => Err(GenerationError::EmptyResponse),
        }
    }
}
