//! Request and response payloads of the account endpoints

use serde::{Deserialize, Serialize};

/// Body of `POST /users`
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation error rather than a body rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Body of `PUT /users/:user_name`
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: Option<String>,
}

/// `?action=` query flag shared by the account and list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
}

impl ActionQuery {
    pub fn is(&self, action: &str) -> bool {
        self.action.as_deref() == Some(action)
    }
}

/// Response of a successful authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub success: bool,
    pub token: String,
}

/// `{code, msg}` body used for acknowledgements and errors alike
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub code: u16,
    pub msg: String,
}

impl MessageResponse {
    pub fn new(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }
}
