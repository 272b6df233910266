//! PostgreSQL connectivity for the user service.
//!
//! - [`postgres`]: pool configuration, connect (with startup retry), health
//!   ping and migration runner, all on top of SeaORM.
//! - [`common`]: the shared error type and the exponential backoff helper.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "users_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::DatabaseError;
