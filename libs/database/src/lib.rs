//! PostgreSQL connectivity for the GoStay services.
//!
//! - [`postgres`]: pool configuration, connect (optionally with retry),
//!   migrations and health probes on top of SeaORM
//! - [`common`]: the shared [`common::DatabaseError`] and the backoff helper
//!   used while the database is still coming up
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(
//!     PostgresConfig::from_env()?,
//!     Some(RetryConfig::from_env()?),
//! )
//! .await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "gostay_api").await?;
//! ```

pub mod common;
pub mod postgres;
