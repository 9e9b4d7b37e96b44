use axum::extract::State;
use axum::Json;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;

use super::summary::{self, DashboardSummary};

/// GET /dashboard/summary
pub async fn handle_dashboard_summary(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<DashboardSummary>, AppError> {
    let data = summary::get_dashboard_summary(&state.db, current.user_id).await?;
    Ok(Json(data))
}
