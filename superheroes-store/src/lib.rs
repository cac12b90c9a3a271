//! Relational persistence for the superheroes API.
//!
//! Exposes the [`HeroRepository`] contract and its SQLite implementation.
//! Every call takes the repository handle explicitly; there is no
//! process-wide session.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod sqlite;

pub use config::StoreConfig;
pub use error::StoreError;
pub use repository::HeroRepository;
pub use sqlite::SqliteRepository;
