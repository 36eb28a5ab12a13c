//! Booking confirmation delivery.

use async_trait::async_trait;
use axum_helpers::AuthUser;
use chrono::{Datelike, Utc};
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use email::{BOOKING_CONFIRMATION, Email, EmailProvider, TemplateEngine};
use serde_json::json;
use std::sync::Arc;

use crate::models::{Booking, RoomWithHotel};

/// Sender identity and presentation settings for guest emails.
///
/// - `SENDER_EMAIL` (required)
/// - `CURRENCY` (default `$`)
/// - `BRAND_NAME` (default `GoStay`)
#[derive(Clone, Debug)]
pub struct NotificationConfig {
    pub sender_email: String,
    pub currency: String,
    pub brand_name: String,
}

impl NotificationConfig {
    pub fn new(sender_email: impl Into<String>) -> Self {
        Self {
            sender_email: sender_email.into(),
            currency: "$".to_string(),
            brand_name: "GoStay".to_string(),
        }
    }
}

impl FromEnv for NotificationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            sender_email: env_required("SENDER_EMAIL")?,
            currency: env_or_default("CURRENCY", "$"),
            brand_name: env_or_default("BRAND_NAME", "GoStay"),
        })
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    /// Tell the guest their booking exists
    async fn send_confirmation(
        &self,
        user: &AuthUser,
        booking: &Booking,
        room: &RoomWithHotel,
    ) -> eyre::Result<()>;
}

/// Drops every confirmation
pub struct NoopNotifier;

#[async_trait]
impl BookingNotifier for NoopNotifier {
    async fn send_confirmation(
        &self,
        _user: &AuthUser,
        booking: &Booking,
        _room: &RoomWithHotel,
    ) -> eyre::Result<()> {
        tracing::debug!(booking_id = %booking.id, "Confirmation skipped");
        Ok(())
    }
}

/// Renders the `booking_confirmation` template and hands it to an [`EmailProvider`].
pub struct EmailBookingNotifier {
    provider: Arc<dyn EmailProvider>,
    templates: Arc<TemplateEngine>,
    config: NotificationConfig,
}

impl EmailBookingNotifier {
    pub fn new(
        provider: Arc<dyn EmailProvider>,
        templates: Arc<TemplateEngine>,
        config: NotificationConfig,
    ) -> Self {
        Self {
            provider,
            templates,
            config,
        }
    }

    /// Build the message without sending it
    pub fn compose(
        &self,
        user: &AuthUser,
        booking: &Booking,
        room: &RoomWithHotel,
    ) -> eyre::Result<Email> {
        let data = json!({
            "brand_name": self.config.brand_name,
            "username": user.username,
            "booking_id": booking.id.to_string(),
            "hotel_name": room.hotel.name,
            "location": room.hotel.address,
            // e.g. "Mon Jan 01 2024"
            "check_in": booking.check_in_date.format("%a %b %d %Y").to_string(),
            "currency": self.config.currency,
            "amount": format_amount(booking.total_price),
            "year": Utc::now().year(),
        });

        let rendered = self.templates.render(BOOKING_CONFIRMATION, &data)?;

        let mut email = Email::new(user.email.clone(), rendered.subject)
            .with_from(self.config.sender_email.clone());
        if let Some(html) = rendered.body_html {
            email = email.with_html(html);
        }
        if let Some(text) = rendered.body_text {
            email = email.with_text(text);
        }
        Ok(email)
    }
}

#[async_trait]
impl BookingNotifier for EmailBookingNotifier {
    async fn send_confirmation(
        &self,
        user: &AuthUser,
        booking: &Booking,
        room: &RoomWithHotel,
    ) -> eyre::Result<()> {
        let email = self.compose(user, booking, room)?;
        let result = self.provider.send(&email).await?;

        tracing::info!(
            booking_id = %booking.id,
            provider = self.provider.name(),
            message_id = %result.message_id,
            "Booking confirmation sent"
        );
        Ok(())
    }
}

/// Shortest decimal form: `300`, `87.5`.
fn format_amount(amount: f64) -> String {
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, Hotel, NewBooking, Room, User};
    use chrono::TimeZone;
    use email::MockEmailProvider;
    use uuid::Uuid;

    fn fixture() -> (AuthUser, Booking, RoomWithHotel) {
        let user = AuthUser {
            id: Uuid::now_v7(),
            email: "alice@example.com".to_string(),
            username: "Alice".to_string(),
        };
        let hotel = Hotel {
            id: Uuid::now_v7(),
            name: "Seaside Inn".to_string(),
            address: "1 Beach Rd".to_string(),
            city: "Porto".to_string(),
            contact: String::new(),
            owner_id: Uuid::now_v7(),
        };
        let room = Room {
            id: Uuid::now_v7(),
            hotel_id: hotel.id,
            room_type: "Double Bed".to_string(),
            price_per_night: 100.0,
            is_available: true,
        };
        let booking = Booking::from_new(NewBooking {
            guest: User {
                id: user.id,
                email: user.email.clone(),
                username: user.username.clone(),
            },
            room_id: room.id,
            hotel_id: hotel.id,
            guests: 2,
            range: DateRange::new(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap(),
            )
            .unwrap(),
            total_price: 300.0,
        });
        (user, booking, RoomWithHotel { room, hotel })
    }

    fn notifier(provider: MockEmailProvider, currency: &str) -> EmailBookingNotifier {
        let mut config = NotificationConfig::new("bookings@gostay.test");
        config.currency = currency.to_string();
        EmailBookingNotifier::new(
            Arc::new(provider),
            Arc::new(TemplateEngine::new().unwrap()),
            config,
        )
    }

    #[tokio::test]
    async fn test_confirmation_content() {
        let provider = MockEmailProvider::new();
        let notifier = notifier(provider.clone(), "€");
        let (user, booking, room) = fixture();

        notifier
            .send_confirmation(&user, &booking, &room)
            .await
            .unwrap();

        let sent = provider.last_email().await.unwrap();
        assert_eq!(sent.to, "alice@example.com");
        assert_eq!(sent.from.as_deref(), Some("bookings@gostay.test"));
        assert_eq!(sent.subject, "Your GoStay Booking Confirmation");

        let html = sent.body_html.unwrap();
        assert!(html.contains("Dear <strong>Alice</strong>"));
        assert!(html.contains(&booking.id.to_string()));
        assert!(html.contains("Seaside Inn"));
        assert!(html.contains("1 Beach Rd"));
        assert!(html.contains("Mon Jan 01 2024"));
        assert!(html.contains("€ 300"));
        assert!(html.contains(&format!("&copy; {} GoStay", Utc::now().year())));
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported() {
        let notifier = notifier(MockEmailProvider::failing("smtp down"), "$");
        let (user, booking, room) = fixture();

        let err = notifier
            .send_confirmation(&user, &booking, &room)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("smtp down"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(300.0), "300");
        assert_eq!(format_amount(87.5), "87.5");
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("SENDER_EMAIL", Some("noreply@gostay.test")),
                ("CURRENCY", None),
                ("BRAND_NAME", None),
            ],
            || {
                let config = NotificationConfig::from_env().unwrap();
                assert_eq!(config.sender_email, "noreply@gostay.test");
                assert_eq!(config.currency, "$");
                assert_eq!(config.brand_name, "GoStay");
            },
        );
    }

    #[test]
    fn test_config_requires_sender() {
        temp_env::with_var_unset("SENDER_EMAIL", || {
            assert!(NotificationConfig::from_env().is_err());
        });
    }
}
