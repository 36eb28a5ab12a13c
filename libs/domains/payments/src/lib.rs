//! Payments Domain
//!
//! Opens a provider-hosted checkout session for a booking and hands the
//! redirect URL back to the client. Completion is reported by the provider's
//! webhook, which correlates through the `bookingId` session metadata.
//!
//! ```text
//! POST /payment ──► PaymentService ──► BookingRepository (booking, room, hotel)
//!                         │
//!                         └──► CheckoutProvider (Stripe | mock)
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod service;

pub use error::{PaymentError, PaymentResult};
pub use handlers::ApiDoc;
pub use models::{
    CheckoutRequest, CheckoutSessionUrl, CreatePayment, LineItem, PaymentResponse,
    to_minor_units,
};
pub use provider::{CheckoutProvider, MockCheckoutProvider, StripeCheckoutProvider, StripeConfig};
pub use service::PaymentService;
