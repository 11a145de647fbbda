//! JWT issuance for authenticated users
//!
//! Tokens are HS256-signed with a shared secret and carry the username as
//! their subject. They have no expiry and are not persisted; any service
//! holding the secret can verify them.

use anyhow::Result;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix prepended to issued tokens
pub const BEARER_PREFIX: &str = "BEARER ";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared signing secret
    pub secret: String,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SECRET`: HMAC signing secret
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("SECRET")
            .map_err(|_| anyhow::anyhow!("SECRET environment variable not set"))?;

        if secret.is_empty() {
            anyhow::bail!("SECRET environment variable is empty");
        }

        Ok(JwtConfig { secret })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Issued at time
    pub iat: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        JwtService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Sign a token for `username`, returned with the bearer prefix
    pub fn issue_bearer(&self, username: &str) -> Result<String> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: username.to_owned(),
            iat,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(format!("{}{}", BEARER_PREFIX, token))
    }
}
