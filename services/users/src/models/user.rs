//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::movie::{ListKind, MovieRef};

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub favourites: Vec<MovieRef>,
    pub mustwatch: Vec<MovieRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered user with empty lists
    pub fn from_new(new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            favourites: Vec::new(),
            mustwatch: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn list(&self, kind: ListKind) -> &Vec<MovieRef> {
        match kind {
            ListKind::Favourites => &self.favourites,
            ListKind::Mustwatch => &self.mustwatch,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut Vec<MovieRef> {
        match kind {
            ListKind::Favourites => &mut self.favourites,
            ListKind::Mustwatch => &mut self.mustwatch,
        }
    }
}

/// New user creation payload, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// User as exposed over the API, without the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub favourites: Vec<MovieRef>,
    pub mustwatch: Vec<MovieRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            favourites: user.favourites,
            mustwatch: user.mustwatch,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
