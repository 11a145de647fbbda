//! Shared infrastructure for the movie catalog services
//!
//! Database connectivity and the error types that go with it.

pub mod database;
pub mod error;
