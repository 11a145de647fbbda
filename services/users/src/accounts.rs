//! Account operations behind the HTTP handlers

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    jwt::JwtService,
    models::{ListKind, MovieRef, NewUser, UserResponse},
    password,
    repositories::UserRepository,
    validation,
};

/// Registration, authentication and list management over a [`UserRepository`]
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    jwt: JwtService,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    pub async fn list_users(&self) -> ApiResult<Vec<UserResponse>> {
        let users = self.users.get_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Create an account after checking presence, uniqueness and password rules
    pub async fn register(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> ApiResult<UserResponse> {
        let (username, password) =
            validation::require_credentials(username, password).map_err(ApiError::Validation)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(ApiError::Conflict(
                "Sign up failed. Username already taken.".to_string(),
            ));
        }

        validation::validate_password(password)
            .map_err(|e| ApiError::Validation(format!("Sign up failed. {}", e)))?;

        let password_hash = password::hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?
            // Lost a race with a concurrent registration of the same name
            .ok_or_else(|| {
                ApiError::Conflict("Sign up failed. Username already taken.".to_string())
            })?;

        info!("Registered user: {}", user.username);
        Ok(user.into())
    }

    /// Verify credentials and issue a bearer token
    pub async fn authenticate(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> ApiResult<String> {
        let (username, password) =
            validation::require_credentials(username, password).map_err(ApiError::Validation)?;

        let user = self.users.find_by_username(username).await?.ok_or_else(|| {
            ApiError::NotFound("Authentication failed. User not found.".to_string())
        })?;

        if !password::verify_password(&user.password_hash, password)? {
            debug!("Password mismatch for user: {}", username);
            return Err(ApiError::Auth(
                "Authentication failed. Wrong password.".to_string(),
            ));
        }

        Ok(self.jwt.issue_bearer(&user.username)?)
    }

    pub async fn change_password(&self, username: &str, password: Option<&str>) -> ApiResult<()> {
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::NotFound("Unable to parse password".to_string()))?;

        let password_hash = password::hash_password(password)?;
        if !self.users.update_password(username, &password_hash).await? {
            return Err(ApiError::NotFound("Unable to Update User".to_string()));
        }

        info!("Updated password for user: {}", username);
        Ok(())
    }

    pub async fn add_movie(
        &self,
        username: &str,
        kind: ListKind,
        movie: &MovieRef,
    ) -> ApiResult<Vec<MovieRef>> {
        self.users
            .add_movie(username, kind, movie)
            .await?
            .ok_or_else(|| unknown_user(username))
    }

    pub async fn remove_movie(
        &self,
        username: &str,
        kind: ListKind,
        movie_id: &Value,
    ) -> ApiResult<Vec<MovieRef>> {
        self.users
            .remove_movie(username, kind, movie_id)
            .await?
            .ok_or_else(|| unknown_user(username))
    }

    pub async fn list_movies(&self, username: &str, kind: ListKind) -> ApiResult<Vec<MovieRef>> {
        self.users
            .list_movies(username, kind)
            .await?
            .ok_or_else(|| unknown_user(username))
    }
}

fn unknown_user(username: &str) -> ApiError {
    ApiError::NotFound(format!("User {} not found", username))
}
