//! Router-level tests over the in-memory repository.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use axum_helpers::{JwtAuth, JwtConfig};
use chrono::{Duration, TimeZone, Utc};
use domain_bookings::{
    Booking, BookingService, DateRange, EmailBookingNotifier, Hotel, InMemoryBookingRepository,
    NewBooking, NoopNotifier, NotificationConfig, Room, User, handlers,
};
use email::{MockEmailProvider, TemplateEngine};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "gostay-handler-test-secret-0123456789";

struct Fixture {
    app: Router,
    repo: InMemoryBookingRepository,
    room: Room,
    hotel: Hotel,
    guest: User,
    owner: User,
}

async fn seed(repo: &InMemoryBookingRepository) -> (Hotel, Room, User, User) {
    let owner = User {
        id: Uuid::now_v7(),
        email: "owner@example.com".to_string(),
        username: "Olga".to_string(),
    };
    let guest = User {
        id: Uuid::now_v7(),
        email: "guest@example.com".to_string(),
        username: "Gus".to_string(),
    };
    let hotel = Hotel {
        id: Uuid::now_v7(),
        name: "Seaside Inn".to_string(),
        address: "1 Beach Rd".to_string(),
        city: "Porto".to_string(),
        contact: "+351 000 000".to_string(),
        owner_id: owner.id,
    };
    let room = Room {
        id: Uuid::now_v7(),
        hotel_id: hotel.id,
        room_type: "Double Bed".to_string(),
        price_per_night: 100.0,
        is_available: true,
    };

    repo.add_user(owner.clone()).await;
    repo.add_user(guest.clone()).await;
    repo.add_hotel(hotel.clone()).await;
    repo.add_room(room.clone()).await;
    (hotel, room, guest, owner)
}

fn auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET))
}

async fn fixture() -> Fixture {
    let repo = InMemoryBookingRepository::new();
    let (hotel, room, guest, owner) = seed(&repo).await;
    let service = BookingService::new(repo.clone(), Arc::new(NoopNotifier));
    Fixture {
        app: handlers::router(service, auth()),
        repo,
        room,
        hotel,
        guest,
        owner,
    }
}

fn token(user: &User) -> String {
    auth()
        .create_access_token(&user.id.to_string(), &user.email, &user.username, &[])
        .unwrap()
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_with(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn stored(room: &Room, guest: &User, from: u32, to: u32, total: f64) -> Booking {
    Booking::from_new(NewBooking {
        guest: guest.clone(),
        room_id: room.id,
        hotel_id: room.hotel_id,
        guests: 2,
        range: DateRange::new(
            Utc.with_ymd_and_hms(2024, 1, from, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, to, 0, 0, 0).unwrap(),
        )
        .unwrap(),
        total_price: total,
    })
}

#[tokio::test]
async fn test_check_availability_is_public_and_inclusive() {
    let f = fixture().await;
    f.repo
        .add_booking(stored(&f.room, &f.guest, 10, 15, 500.0))
        .await;

    // Touching the existing check-out day counts as a clash
    let (status, body) = send(
        &f.app,
        post_json(
            "/check-availability",
            json!({"room": f.room.id, "checkInDate": "2024-01-15", "checkOutDate": "2024-01-20"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "isAvailable": false}));

    let (_, body) = send(
        &f.app,
        post_json(
            "/check-availability",
            json!({"room": f.room.id, "checkInDate": "2024-01-16", "checkOutDate": "2024-01-20"}),
            None,
        ),
    )
    .await;
    assert_eq!(body["isAvailable"], json!(true));
}

#[tokio::test]
async fn test_check_availability_unknown_room_is_available() {
    let f = fixture().await;
    let (status, body) = send(
        &f.app,
        post_json(
            "/check-availability",
            json!({"room": Uuid::now_v7(), "checkInDate": "2024-02-01", "checkOutDate": "2024-02-03"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isAvailable"], json!(true));
}

#[tokio::test]
async fn test_book_requires_token() {
    let f = fixture().await;
    let (status, _) = send(
        &f.app,
        post_json(
            "/book",
            json!({"room": f.room.id, "checkInDate": "2024-03-01", "checkOutDate": "2024-03-04", "guests": 2}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(f.repo.booking_count().await, 0);
}

#[tokio::test]
async fn test_book_rejects_zero_guests() {
    let f = fixture().await;
    let token = token(&f.guest);
    let (status, _) = send(
        &f.app,
        post_json(
            "/book",
            json!({"room": f.room.id, "checkInDate": "2024-03-01", "checkOutDate": "2024-03-04", "guests": 0}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(f.repo.booking_count().await, 0);
}

#[tokio::test]
async fn test_book_creates_priced_booking() {
    let f = fixture().await;
    let token = token(&f.guest);

    let (status, body) = send(
        &f.app,
        post_json(
            "/book",
            json!({"room": f.room.id, "checkInDate": "2024-03-01", "checkOutDate": "2024-03-04", "guests": "2"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Booking created successfully"})
    );

    let (_, body) = send(&f.app, get_with("/user", &token)).await;
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["totalPrice"], json!(300.0));
    assert_eq!(bookings[0]["guests"], json!(2));
    assert_eq!(bookings[0]["isPaid"], json!(false));
    assert_eq!(bookings[0]["paymentMethod"], json!("Pay At Hotel"));
    assert_eq!(bookings[0]["hotelId"], json!(f.hotel.id));
    assert_eq!(bookings[0]["hotel"]["name"], json!("Seaside Inn"));
}

#[tokio::test]
async fn test_book_overlapping_range_is_refused() {
    let f = fixture().await;
    f.repo
        .add_booking(stored(&f.room, &f.owner, 10, 15, 500.0))
        .await;
    let token = token(&f.guest);

    let (status, body) = send(
        &f.app,
        post_json(
            "/book",
            json!({"room": f.room.id, "checkInDate": "2024-01-12", "checkOutDate": "2024-01-18", "guests": 1}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": false, "message": "Room is not available"})
    );
    assert_eq!(f.repo.booking_count().await, 1);
}

#[tokio::test]
async fn test_book_inverted_dates_are_refused() {
    let f = fixture().await;
    let token = token(&f.guest);

    let (status, body) = send(
        &f.app,
        post_json(
            "/book",
            json!({"room": f.room.id, "checkInDate": "2024-03-04", "checkOutDate": "2024-03-01", "guests": 1}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(f.repo.booking_count().await, 0);
}

#[tokio::test]
async fn test_book_sends_confirmation_email() {
    let repo = InMemoryBookingRepository::new();
    let (_, room, guest, _) = seed(&repo).await;
    let provider = MockEmailProvider::new();
    let notifier = EmailBookingNotifier::new(
        Arc::new(provider.clone()),
        Arc::new(TemplateEngine::new().unwrap()),
        NotificationConfig::new("bookings@gostay.test"),
    );
    let app = handlers::router(
        BookingService::new(repo, Arc::new(notifier)),
        auth(),
    );

    let (_, body) = send(
        &app,
        post_json(
            "/book",
            json!({"room": room.id, "checkInDate": "2024-03-01", "checkOutDate": "2024-03-04", "guests": 2}),
            Some(&token(&guest)),
        ),
    )
    .await;
    assert_eq!(body["success"], json!(true));

    assert!(provider.was_sent_to("guest@example.com").await);
    let sent = provider.last_email().await.unwrap();
    assert_eq!(sent.subject, "Your GoStay Booking Confirmation");
    assert!(sent.body_html.unwrap().contains("$ 300"));
}

#[tokio::test]
async fn test_book_succeeds_when_email_fails() {
    let repo = InMemoryBookingRepository::new();
    let (_, room, guest, _) = seed(&repo).await;
    let notifier = EmailBookingNotifier::new(
        Arc::new(MockEmailProvider::failing("smtp unreachable")),
        Arc::new(TemplateEngine::new().unwrap()),
        NotificationConfig::new("bookings@gostay.test"),
    );
    let app = handlers::router(
        BookingService::new(repo.clone(), Arc::new(notifier)),
        auth(),
    );

    let (_, body) = send(
        &app,
        post_json(
            "/book",
            json!({"room": room.id, "checkInDate": "2024-03-01", "checkOutDate": "2024-03-04", "guests": 2}),
            Some(&token(&guest)),
        ),
    )
    .await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(repo.booking_count().await, 1);
}

#[tokio::test]
async fn test_user_bookings_newest_first() {
    let f = fixture().await;
    let base = Utc::now();
    for (minutes, from) in [(1, 1), (5, 5), (3, 9)] {
        let mut booking = stored(&f.room, &f.guest, from, from + 2, 200.0);
        booking.created_at = base + Duration::minutes(minutes);
        f.repo.add_booking(booking).await;
    }
    // Someone else's booking stays out of the list
    f.repo
        .add_booking(stored(&f.room, &f.owner, 20, 22, 200.0))
        .await;

    let (status, body) = send(&f.app, get_with("/user", &token(&f.guest))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let check_ins: Vec<&str> = body["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["checkInDate"].as_str().unwrap())
        .collect();
    assert_eq!(check_ins.len(), 3);
    assert!(check_ins[0].starts_with("2024-01-05"));
    assert!(check_ins[1].starts_with("2024-01-09"));
    assert!(check_ins[2].starts_with("2024-01-01"));
}

#[tokio::test]
async fn test_hotel_dashboard_totals() {
    let f = fixture().await;
    f.repo
        .add_booking(stored(&f.room, &f.guest, 1, 3, 200.0))
        .await;
    f.repo
        .add_booking(stored(&f.room, &f.guest, 5, 8, 300.0))
        .await;

    // A second hotel whose bookings must not leak into the first dashboard
    let other_hotel = Hotel {
        id: Uuid::now_v7(),
        name: "Hill Lodge".to_string(),
        address: "2 Hill St".to_string(),
        city: "Braga".to_string(),
        contact: String::new(),
        owner_id: Uuid::now_v7(),
    };
    let other_room = Room {
        id: Uuid::now_v7(),
        hotel_id: other_hotel.id,
        room_type: "Single Bed".to_string(),
        price_per_night: 50.0,
        is_available: true,
    };
    f.repo.add_hotel(other_hotel).await;
    f.repo.add_room(other_room.clone()).await;
    f.repo
        .add_booking(stored(&other_room, &f.guest, 1, 2, 50.0))
        .await;

    let (status, body) = send(&f.app, get_with("/hotel", &token(&f.owner))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let dashboard = &body["dashboardData"];
    assert_eq!(dashboard["totalBookings"], json!(2));
    assert_eq!(dashboard["totalRevenue"], json!(500.0));
    let bookings = dashboard["bookings"].as_array().unwrap();
    assert!(bookings.iter().all(|b| b["hotelId"] == json!(f.hotel.id)));
    assert_eq!(bookings[0]["user"]["username"], json!("Gus"));
}

#[tokio::test]
async fn test_hotel_dashboard_without_hotel() {
    let f = fixture().await;
    let (status, body) = send(&f.app, get_with("/hotel", &token(&f.guest))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "message": "No hotel found"}));
}
