//! HTTP API gateway for the superheroes store.
//!
//! Exposes heroes, powers, and hero/power associations as JSON endpoints.
//! Mutation bodies are form-encoded.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod form;
pub mod path;
pub mod policy;
pub mod routes;
