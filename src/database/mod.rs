//! Database module
//!
//! PostgreSQL pool setup, migrations and the FAQ repository

pub mod connection;
pub mod repositories;

pub use connection::{DatabasePool, create_pool, run_migrations, health_check};
pub use repositories::FaqRepository;
