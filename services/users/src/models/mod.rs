//! Account service models

pub mod movie;
pub mod requests;
pub mod user;

// Re-export for convenience
pub use movie::{ListKind, MovieRef};
pub use requests::{
    ActionQuery, AuthenticateResponse, CredentialsRequest, MessageResponse,
    UpdatePasswordRequest,
};
pub use user::{NewUser, User, UserResponse};
