//! Sea-ORM entities for the tables the bookings domain reads and writes.

pub mod booking;
pub mod hotel;
pub mod room;
pub mod user;
