//! Mock checkout provider for tests and local runs

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::CheckoutProvider;
use crate::error::{PaymentError, PaymentResult};
use crate::models::{CheckoutRequest, CheckoutSessionUrl};

/// Records every request and answers with a fake hosted URL
#[derive(Clone, Default)]
pub struct MockCheckoutProvider {
    requests: Arc<Mutex<Vec<CheckoutRequest>>>,
    failure_message: Option<String>,
}

impl MockCheckoutProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider that always fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            requests: Arc::default(),
            failure_message: Some(message.into()),
        }
    }

    pub async fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> Option<CheckoutRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    async fn create_session(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSessionUrl> {
        let mut requests = self.requests.lock().await;
        requests.push(request.clone());

        if let Some(message) = &self.failure_message {
            return Err(PaymentError::PaymentFailed(message.clone()));
        }

        let session_id = format!("cs_mock_{}", requests.len());
        tracing::debug!(session_id = %session_id, "Mock checkout session created");
        Ok(CheckoutSessionUrl {
            url: format!("https://checkout.mock/pay/{}", session_id),
            session_id,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
