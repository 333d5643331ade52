use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::DashboardStatsDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Complaint statistics for the caller's scope
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Complaint statistics", body = ApiResponse<DashboardStatsDto>),
        (status = 403, description = "Agency staff without an agency assignment")
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn get_stats(
    user: AuthenticatedUser,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>> {
    let stats = service.stats(&user).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
