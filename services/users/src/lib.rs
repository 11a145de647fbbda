//! Account & list service for the movie catalog
//!
//! Registration, authentication and the per-user favourites / must-watch
//! lists, served over HTTP by [`routes::create_router`].

pub mod accounts;
pub mod config;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;
