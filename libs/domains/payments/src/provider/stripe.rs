//! Stripe Checkout over its form-encoded REST API.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use super::CheckoutProvider;
use crate::error::{PaymentError, PaymentResult};
use crate::models::{CheckoutRequest, CheckoutSessionUrl};

/// Stripe API configuration.
///
/// - `STRIPE_SECRET_KEY` (required)
/// - `STRIPE_API_BASE` (default `https://api.stripe.com`)
/// - `STRIPE_CURRENCY` (default `usd`)
/// - `STRIPE_TIMEOUT_SECS` (default 10)
#[derive(Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
    pub currency: String,
    pub timeout: Duration,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: "https://api.stripe.com".to_string(),
            currency: "usd".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("currency", &self.currency)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FromEnv for StripeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = env_parse("STRIPE_TIMEOUT_SECS", "10")?;
        Ok(Self {
            secret_key: env_required("STRIPE_SECRET_KEY")?,
            api_base: env_or_default("STRIPE_API_BASE", "https://api.stripe.com"),
            currency: env_or_default("STRIPE_CURRENCY", "usd"),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

pub struct StripeCheckoutProvider {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutProvider {
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Flatten a request into Stripe's bracketed form fields.
fn form_fields(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut fields = vec![
        ("mode".to_string(), request.mode.clone()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];

    for (i, item) in request.line_items.iter().enumerate() {
        let prefix = format!("line_items[{}]", i);
        fields.push((
            format!("{}[price_data][currency]", prefix),
            item.currency.clone(),
        ));
        fields.push((
            format!("{}[price_data][product_data][name]", prefix),
            item.product_name.clone(),
        ));
        fields.push((
            format!("{}[price_data][unit_amount]", prefix),
            item.unit_amount.to_string(),
        ));
        fields.push((format!("{}[quantity]", prefix), item.quantity.to_string()));
    }

    for (key, value) in &request.metadata {
        fields.push((format!("metadata[{}]", key), value.clone()));
    }

    fields
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutProvider {
    async fn create_session(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSessionUrl> {
        debug!(
            line_items = request.line_items.len(),
            success_url = %request.success_url,
            "Creating Stripe checkout session"
        );

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.config.api_base))
            .bearer_auth(&self.config.secret_key)
            .form(&form_fields(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            error!(status = %status, message = %message, "Stripe rejected checkout session");
            return Err(PaymentError::PaymentFailed(message));
        }

        let session: SessionResponse = response.json().await?;
        let url = session.url.ok_or_else(|| {
            PaymentError::PaymentFailed(format!("Session {} has no redirect url", session.id))
        })?;

        info!(session_id = %session.id, "Stripe checkout session created");
        Ok(CheckoutSessionUrl {
            session_id: session.id,
            url,
        })
    }

    fn name(&self) -> &'static str {
        "stripe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItem;
    use std::collections::BTreeMap;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            line_items: vec![LineItem {
                currency: "usd".to_string(),
                product_name: "Seaside Inn".to_string(),
                unit_amount: 30000,
                quantity: 1,
            }],
            mode: "payment".to_string(),
            success_url: "https://app.test/loader/my-bookings".to_string(),
            cancel_url: "https://app.test/my-bookings".to_string(),
            metadata: BTreeMap::from([("bookingId".to_string(), "abc".to_string())]),
        }
    }

    #[test]
    fn test_form_fields() {
        let fields = form_fields(&request());
        let get = |key: &str| {
            fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            Some("Seaside Inn")
        );
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("30000"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(get("metadata[bookingId]"), Some("abc"));
        assert_eq!(
            get("cancel_url"),
            Some("https://app.test/my-bookings")
        );
    }

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("STRIPE_SECRET_KEY", Some("sk_test_123")),
                ("STRIPE_API_BASE", None),
                ("STRIPE_CURRENCY", None),
                ("STRIPE_TIMEOUT_SECS", None),
            ],
            || {
                let config = StripeConfig::from_env().unwrap();
                assert_eq!(config.api_base, "https://api.stripe.com");
                assert_eq!(config.currency, "usd");
                assert_eq!(config.timeout, Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn test_config_requires_secret_key() {
        temp_env::with_var_unset("STRIPE_SECRET_KEY", || {
            assert!(StripeConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", StripeConfig::new("sk_live_secret"));
        assert!(!rendered.contains("sk_live_secret"));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_payment_failure() {
        let mut config = StripeConfig::new("sk_test_123");
        // Nothing listens on the discard port
        config.api_base = "http://127.0.0.1:9".to_string();
        config.timeout = Duration::from_secs(2);

        let provider = StripeCheckoutProvider::new(config).unwrap();
        let result = provider.create_session(&request()).await;
        assert!(matches!(result, Err(PaymentError::PaymentFailed(_))));
    }
}
