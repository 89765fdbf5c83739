//! Adapters - implementations of the ports against real infrastructure.
//!
//! - `postgres` - sqlx-backed repositories and readers
//! - `http` - axum REST API

pub mod http;
pub mod postgres;
