//! Mock advice model for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use nettakip_core::error::CoachError;
use nettakip_core::traits::AdviceModel;

/// A mock model that returns a fixed reply, or fails on demand.
#[derive(Default)]
pub struct MockModel {
    response: String,
    fail: bool,
    call_count: AtomicU32,
    last_prompt: Mutex<Option<String>>,
}

impl MockModel {
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            response: response.to_string(),
            ..Self::default()
        }
    }

    /// A model whose every call fails with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdviceModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, CoachError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if self.fail {
            return Err(CoachError::Network("connection refused".into()));
        }
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_prompt_and_count() {
        let model = MockModel::with_fixed_response("tavsiye");
        let reply = model.generate("soru").await.unwrap();
        assert_eq!(reply, "tavsiye");
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.last_prompt().unwrap(), "soru");
    }

    #[tokio::test]
    async fn failing_model_fails() {
        let model = MockModel::failing();
        assert!(model.generate("soru").await.is_err());
    }
}
