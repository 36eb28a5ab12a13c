//! Hosted checkout providers

pub mod mock;
pub mod stripe;

pub use mock::MockCheckoutProvider;
pub use stripe::{StripeCheckoutProvider, StripeConfig};

use async_trait::async_trait;

use crate::error::PaymentResult;
use crate::models::{CheckoutRequest, CheckoutSessionUrl};

/// Opens a provider-hosted checkout session
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    async fn create_session(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSessionUrl>;

    fn name(&self) -> &'static str;
}
