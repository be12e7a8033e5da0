//! Requester identity.
//!
//! Authentication happens at the gateway in front of this service, which forwards the
//! authenticated account id in `X-User-Id`. Handlers take `AuthUser` and scope every
//! profile/routine query by it.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { user_id })
    }
}

/// Rejects access to a resource owned by another account.
pub fn ensure_owner(requester: &AuthUser, owner_id: Uuid) -> Result<(), AppError> {
    if requester.user_id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
