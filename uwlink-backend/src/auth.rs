use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::{error::AppError, AppState};

/// The authenticated owner, taken from the `Authorization: Bearer` header.
///
/// Handlers that accept this extractor reject unauthenticated requests with
/// 401 before the handler body runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthOwner {
    pub owner_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims = state.token_keys.verify(token).map_err(|e| match e {
            uwlink_auth::AuthError::TokenExpired => AppError::TokenExpired,
            _ => AppError::Unauthorized,
        })?;

        Ok(AuthOwner {
            owner_id: claims.sub,
        })
    }
}
