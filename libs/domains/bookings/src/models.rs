use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BookingError, BookingResult};

/// Payment method recorded for bookings created through the booking flow
pub const DEFAULT_PAYMENT_METHOD: &str = "Pay At Hotel";

/// A persisted reservation of one room for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    /// Copied from the room at creation time
    pub hotel_id: Uuid,
    pub guests: u32,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub total_price: f64,
    pub is_paid: bool,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_new(new: NewBooking) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id: new.guest.id,
            room_id: new.room_id,
            hotel_id: new.hotel_id,
            guests: new.guests,
            check_in_date: new.range.check_in,
            check_out_date: new.range.check_out,
            total_price: new.total_price,
            is_paid: false,
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            check_in: self.check_in_date,
            check_out: self.check_out_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type: String,
    pub price_per_night: f64,
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub contact: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

/// A room joined with the hotel that owns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomWithHotel {
    pub room: Room,
    pub hotel: Hotel,
}

/// A booking with its room and hotel embedded, plus the guest on the owner view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub room: Room,
    pub hotel: Hotel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelDashboard {
    pub total_bookings: usize,
    pub total_revenue: f64,
    pub bookings: Vec<BookingDetails>,
}

impl HotelDashboard {
    pub fn from_bookings(bookings: Vec<BookingDetails>) -> Self {
        let total_revenue = bookings.iter().map(|b| b.booking.total_price).sum();
        Self {
            total_bookings: bookings.len(),
            total_revenue,
            bookings,
        }
    }
}

/// A stay interval in UTC, check-in strictly before check-out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl DateRange {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> BookingResult<Self> {
        if check_out <= check_in {
            return Err(BookingError::InvalidDateRange);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }
}

/// Input needed by the repository to persist a booking
///
/// `guest` is the authenticated caller; the repository upserts it into the
/// local user table together with the booking.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub guest: User,
    pub room_id: Uuid,
    pub hotel_id: Uuid,
    pub guests: u32,
    pub range: DateRange,
    pub total_price: f64,
}

/// `POST /check-availability` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailability {
    pub room: Uuid,
    /// `YYYY-MM-DD` or RFC 3339
    #[serde(deserialize_with = "deserialize_booking_date")]
    pub check_in_date: DateTime<Utc>,
    /// `YYYY-MM-DD` or RFC 3339
    #[serde(deserialize_with = "deserialize_booking_date")]
    pub check_out_date: DateTime<Utc>,
}

/// `POST /book` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub room: Uuid,
    #[serde(deserialize_with = "deserialize_booking_date")]
    pub check_in_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_booking_date")]
    pub check_out_date: DateTime<Utc>,
    /// Accepts a number or a numeric string
    #[serde(deserialize_with = "deserialize_guests")]
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub success: bool,
    pub is_available: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserBookingsResponse {
    pub success: bool,
    pub bookings: Vec<BookingDetails>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub success: bool,
    pub dashboard_data: HotelDashboard,
}

/// Parse a calendar date (midnight UTC) or an RFC 3339 timestamp
pub fn parse_booking_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_booking_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_booking_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid date '{}', expected YYYY-MM-DD or RFC 3339",
            raw
        ))
    })
}

fn deserialize_guests<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Guests {
        Number(u32),
        Text(String),
    }

    match Guests::deserialize(deserializer)? {
        Guests::Number(n) => Ok(n),
        Guests::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid guest count '{}'", s))),
    }
}
