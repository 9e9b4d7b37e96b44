pub mod handlers;
pub mod jwt;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, extracted from the Bearer token on every
/// protected route.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: i64,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::InvalidToken)?;
        let token = header.strip_prefix("Bearer ").ok_or(AppError::InvalidToken)?;
        let user_id = jwt::decode_access_token(token, &state.config.jwt_secret)?;
        Ok(CurrentUser { user_id })
    }
}
