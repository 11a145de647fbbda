//! Persistence of user accounts and their movie lists
//!
//! Every method is a single store operation. List mutations in particular
//! must apply the dedup/filter and the write atomically so concurrent
//! requests for the same user cannot lose updates.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::models::{ListKind, MovieRef, NewUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;

/// User repository
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in creation order
    async fn get_all(&self) -> Result<Vec<User>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Insert a new user, or `None` when the username is already taken
    async fn create(&self, new_user: NewUser) -> Result<Option<User>>;

    /// Replace the stored password hash, returning whether a user matched
    async fn update_password(&self, username: &str, password_hash: &str) -> Result<bool>;

    /// Append `movie` to the list unless its id is present; `None` for an unknown user
    async fn add_movie(
        &self,
        username: &str,
        kind: ListKind,
        movie: &MovieRef,
    ) -> Result<Option<Vec<MovieRef>>>;

    /// Remove entries with `movie_id` from the list; `None` for an unknown user
    async fn remove_movie(
        &self,
        username: &str,
        kind: ListKind,
        movie_id: &Value,
    ) -> Result<Option<Vec<MovieRef>>>;

    /// Read one list; `None` for an unknown user
    async fn list_movies(&self, username: &str, kind: ListKind) -> Result<Option<Vec<MovieRef>>>;
}
