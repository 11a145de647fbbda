//! In-process user repository

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::UserRepository;
use crate::models::{ListKind, MovieRef, NewUser, User, movie};

/// User repository backed by a vector behind a tokio lock
///
/// Mutations run entirely under the write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_all(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<Option<User>> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == new_user.username) {
            debug!("Username already taken: {}", new_user.username);
            return Ok(None);
        }

        let user = User::from_new(new_user);
        users.push(user.clone());
        Ok(Some(user))
    }

    async fn update_password(&self, username: &str, password_hash: &str) -> Result<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.username == username) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_movie(
        &self,
        username: &str,
        kind: ListKind,
        movie: &MovieRef,
    ) -> Result<Option<Vec<MovieRef>>> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.username == username) else {
            return Ok(None);
        };

        if movie::add_unique(user.list_mut(kind), movie.clone()) {
            user.updated_at = chrono::Utc::now();
        }
        Ok(Some(user.list(kind).clone()))
    }

    async fn remove_movie(
        &self,
        username: &str,
        kind: ListKind,
        movie_id: &Value,
    ) -> Result<Option<Vec<MovieRef>>> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.username == username) else {
            return Ok(None);
        };

        if movie::remove_by_id(user.list_mut(kind), movie_id) {
            user.updated_at = chrono::Utc::now();
        }
        Ok(Some(user.list(kind).clone()))
    }

    async fn list_movies(&self, username: &str, kind: ListKind) -> Result<Option<Vec<MovieRef>>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.list(kind).clone()))
    }
}
