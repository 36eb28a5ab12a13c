//! Transactional email library
//!
//! ## Components
//!
//! - **Email Models**: `Email` message with text and HTML bodies
//! - **Providers**: SMTP via lettre, and a capturing mock for tests and local runs
//! - **Templates**: Handlebars-based `TemplateEngine` carrying the booking confirmation
//!
//! ## Usage
//!
//! ```ignore
//! use email::{Email, EmailProvider, SmtpConfig, SmtpProvider, TemplateEngine};
//!
//! let provider = SmtpProvider::new(SmtpConfig::from_env()?)?;
//! let templates = TemplateEngine::new()?;
//! let rendered = templates.render(BOOKING_CONFIRMATION, &data)?;
//! provider.send(&Email::new(to, rendered.subject).with_html(html)).await?;
//! ```

pub mod error;
pub mod models;
pub mod provider;
pub mod templates;

pub use error::{NotificationError, NotificationResult};
pub use models::Email;
pub use provider::{EmailProvider, MockEmailProvider, SendResult, SmtpConfig, SmtpProvider};
pub use templates::{EmailTemplate, RenderedTemplate, TemplateEngine, BOOKING_CONFIRMATION};
