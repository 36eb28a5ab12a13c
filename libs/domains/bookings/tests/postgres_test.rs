//! PgBookingRepository against a real Postgres.
//!
//! Run with `cargo test -p domain_bookings -- --ignored` (requires Docker).

use chrono::{TimeZone, Utc};
use domain_bookings::{
    BookingRepository, DateRange, InsertOutcome, NewBooking, PgBookingRepository, User,
};
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

struct Seeded {
    _db: TestDatabase,
    repo: PgBookingRepository,
    owner: Uuid,
    guest: Uuid,
    hotel: Uuid,
    room: Uuid,
}

async fn seeded(test_name: &str) -> Seeded {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name(test_name);

    let owner = db
        .create_test_user(builder.user_id(), &builder.name("owner", "main"))
        .await;
    let guest = db
        .create_test_user(builder.other_user_id(), &builder.name("guest", "main"))
        .await;
    let hotel = db
        .create_test_hotel(owner, &builder.name("hotel", "main"))
        .await;
    let room = db.create_test_room(hotel, 100.0).await;

    Seeded {
        repo: PgBookingRepository::new(db.connection()),
        _db: db,
        owner,
        guest,
        hotel,
        room,
    }
}

fn new_booking(s: &Seeded, from: u32, to: u32) -> NewBooking {
    let guest = User {
        id: s.guest,
        email: format!("test-{}@example.com", s.guest),
        username: "guest".to_string(),
    };
    booking_for(s, guest, from, to)
}

fn booking_for(s: &Seeded, guest: User, from: u32, to: u32) -> NewBooking {
    NewBooking {
        guest,
        room_id: s.room,
        hotel_id: s.hotel,
        guests: 2,
        range: DateRange::new(
            Utc.with_ymd_and_hms(2024, 5, from, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 5, to, 0, 0, 0).unwrap(),
        )
        .unwrap(),
        total_price: 100.0 * f64::from(to - from),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_inclusive_conflict() {
    let s = seeded("pg_insert_and_conflict").await;

    let first = s.repo.insert_if_available(new_booking(&s, 10, 15)).await.unwrap();
    let InsertOutcome::Inserted(booking) = first else {
        panic!("expected insert");
    };
    assert_eq!(booking.total_price, 500.0);
    assert_eq!(booking.payment_method, "Pay At Hotel");

    // Shares the check-out day with the first booking
    let second = s.repo.insert_if_available(new_booking(&s, 15, 18)).await.unwrap();
    assert_eq!(second, InsertOutcome::Conflict);

    let third = s.repo.insert_if_available(new_booking(&s, 16, 18)).await.unwrap();
    assert!(matches!(third, InsertOutcome::Inserted(_)));

    let fetched = s.repo.get_booking(booking.id).await.unwrap().unwrap();
    assert_eq!(fetched.check_in_date, booking.check_in_date);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_inserts_admit_one() {
    let s = seeded("pg_concurrent_inserts").await;
    let repo = Arc::new(s.repo.clone());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            let input = new_booking(&s, 20, 22);
            tokio::spawn(async move { repo.insert_if_available(input).await })
        })
        .collect();

    let mut inserted = 0;
    for handle in handles {
        if let InsertOutcome::Inserted(_) = handle.await.unwrap().unwrap() {
            inserted += 1;
        }
    }
    assert_eq!(inserted, 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_views_join_room_hotel_and_guest() {
    let s = seeded("pg_views").await;
    s.repo.insert_if_available(new_booking(&s, 1, 3)).await.unwrap();
    s.repo.insert_if_available(new_booking(&s, 5, 8)).await.unwrap();

    let mine = s.repo.list_by_user(s.guest).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine[0].booking.created_at >= mine[1].booking.created_at);
    assert!(mine.iter().all(|d| d.user.is_none() && d.hotel.id == s.hotel));

    let hotel = s.repo.find_hotel_by_owner(s.owner).await.unwrap().unwrap();
    assert_eq!(hotel.id, s.hotel);

    let theirs = s.repo.list_by_hotel(hotel.id).await.unwrap();
    assert_eq!(theirs.len(), 2);
    assert!(theirs.iter().all(|d| d.user.as_ref().map(|u| u.id) == Some(s.guest)));

    assert!(s.repo.find_hotel_by_owner(s.guest).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_overlapping_and_room_join() {
    let s = seeded("pg_overlap").await;
    s.repo.insert_if_available(new_booking(&s, 10, 15)).await.unwrap();

    let probe = DateRange::new(
        Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap(),
    )
    .unwrap();
    assert_eq!(s.repo.find_overlapping(s.room, probe).await.unwrap().len(), 1);

    let joined = s.repo.find_room_with_hotel(s.room).await.unwrap().unwrap();
    assert_eq!(joined.hotel.id, s.hotel);
    assert_eq!(joined.room.price_per_night, 100.0);
    assert!(s.repo.find_room_with_hotel(Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_for_unreplicated_guest() {
    let s = seeded("pg_unreplicated_guest").await;
    let newcomer = User {
        id: Uuid::now_v7(),
        email: "newcomer@example.com".to_string(),
        username: "Nina".to_string(),
    };

    let outcome = s
        .repo
        .insert_if_available(booking_for(&s, newcomer.clone(), 10, 12))
        .await
        .unwrap();
    assert!(matches!(outcome, InsertOutcome::Inserted(_)));

    // A later booking refreshes the stored username
    let renamed = User {
        username: "Nina R.".to_string(),
        ..newcomer.clone()
    };
    s.repo
        .insert_if_available(booking_for(&s, renamed.clone(), 20, 22))
        .await
        .unwrap();

    let theirs = s.repo.list_by_hotel(s.hotel).await.unwrap();
    assert_eq!(theirs.len(), 2);
    assert!(theirs.iter().all(|d| d.user.as_ref() == Some(&renamed)));
}
