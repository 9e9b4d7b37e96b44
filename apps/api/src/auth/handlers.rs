use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

use super::{jwt, CurrentUser};

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub user: UserRow,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenInfo {
    sub: String,
    email: String,
    aud: String,
    name: Option<String>,
    picture: Option<String>,
}

/// POST /auth/google
/// Verifies a Google ID token, creating the user on first login, and
/// returns a service-issued access token.
pub async fn handle_google_login(
    State(state): State<AppState>,
    Json(body): Json<GoogleLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = reqwest::Client::new()
        .get(GOOGLE_TOKENINFO_URL)
        .query(&[("id_token", &body.id_token)])
        .send()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("tokeninfo request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::InvalidToken);
    }

    let token_info: GoogleTokenInfo = response
        .json()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("tokeninfo parse failed: {e}")))?;

    // Both the web and the mobile OAuth client ids are accepted.
    let aud_ok = token_info.aud == state.config.google_client_id
        || (!state.config.google_client_id_mobile.is_empty()
            && token_info.aud == state.config.google_client_id_mobile);
    if !aud_ok {
        return Err(AppError::InvalidAudience);
    }

    let user = find_or_create_user(&state, &token_info).await?;
    let access_token = jwt::create_access_token(user.id, &state.config.jwt_secret)?;

    Ok(Json(TokenResponse { access_token, user }))
}

/// GET /auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserRow>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(current.user_id)
        .fetch_optional(&state.db)
        .await?;
    user.map(Json)
        .ok_or(AppError::UserNotFound(current.user_id))
}

async fn find_or_create_user(
    state: &AppState,
    info: &GoogleTokenInfo,
) -> Result<UserRow, AppError> {
    let existing: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE google_id = $1")
        .bind(&info.sub)
        .fetch_optional(&state.db)
        .await?;
    if let Some(user) = existing {
        return Ok(user);
    }

    let name = info
        .name
        .clone()
        .unwrap_or_else(|| info.email.split('@').next().unwrap_or_default().to_string());

    let user: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (google_id, email, name, profile_image)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&info.sub)
    .bind(&info.email)
    .bind(&name)
    .bind(&info.picture)
    .fetch_one(&state.db)
    .await?;

    info!("Created user {} for {}", user.id, user.email);
    Ok(user)
}
