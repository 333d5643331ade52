use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::agencies::dtos::{
    AgencyResponseDto, AssignStaffDto, CreateAgencyDto, UpdateAgencyDto,
};
use crate::features::agencies::services::AgencyService;
use crate::features::auth::dtos::UserResponseDto;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// List all agencies including inactive ones
#[utoipa::path(
    get,
    path = "/api/agencies",
    responses(
        (status = 200, description = "List of agencies", body = ApiResponse<Vec<AgencyResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "agencies",
    security(("bearer_auth" = []))
)]
pub async fn list_agencies(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AgencyService>>,
) -> Result<Json<ApiResponse<Vec<AgencyResponseDto>>>> {
    let agencies = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(agencies), None, None)))
}

/// Create an agency
#[utoipa::path(
    post,
    path = "/api/agencies",
    request_body = CreateAgencyDto,
    responses(
        (status = 201, description = "Agency created", body = ApiResponse<AgencyResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate name")
    ),
    tag = "agencies",
    security(("bearer_auth" = []))
)]
pub async fn create_agency(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AgencyService>>,
    AppJson(dto): AppJson<CreateAgencyDto>,
) -> Result<(StatusCode, Json<ApiResponse<AgencyResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let agency = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(agency), None, None)),
    ))
}

/// Update an agency
#[utoipa::path(
    patch,
    path = "/api/agencies/{id}",
    params(("id" = Uuid, Path, description = "Agency ID")),
    request_body = UpdateAgencyDto,
    responses(
        (status = 200, description = "Agency updated", body = ApiResponse<AgencyResponseDto>),
        (status = 404, description = "Agency not found")
    ),
    tag = "agencies",
    security(("bearer_auth" = []))
)]
pub async fn update_agency(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AgencyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateAgencyDto>,
) -> Result<Json<ApiResponse<AgencyResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let agency = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(agency), None, None)))
}

/// Toggle an agency's active flag
#[utoipa::path(
    patch,
    path = "/api/agencies/{id}/toggle",
    params(("id" = Uuid, Path, description = "Agency ID")),
    responses(
        (status = 200, description = "Agency toggled", body = ApiResponse<AgencyResponseDto>),
        (status = 404, description = "Agency not found")
    ),
    tag = "agencies",
    security(("bearer_auth" = []))
)]
pub async fn toggle_agency(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AgencyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AgencyResponseDto>>> {
    let agency = service.toggle_active(id).await?;
    Ok(Json(ApiResponse::success(Some(agency), None, None)))
}

/// Delete an agency without complaints, detaching its staff first
#[utoipa::path(
    delete,
    path = "/api/agencies/{id}",
    params(("id" = Uuid, Path, description = "Agency ID")),
    responses(
        (status = 200, description = "Agency deleted"),
        (status = 400, description = "Agency still has complaints"),
        (status = 404, description = "Agency not found")
    ),
    tag = "agencies",
    security(("bearer_auth" = []))
)]
pub async fn delete_agency(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AgencyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Agency deleted".to_string()),
        None,
    )))
}

/// List agency staff
#[utoipa::path(
    get,
    path = "/api/agencies/{id}/staff",
    params(("id" = Uuid, Path, description = "Agency ID")),
    responses(
        (status = 200, description = "Staff members", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 404, description = "Agency not found")
    ),
    tag = "agencies",
    security(("bearer_auth" = []))
)]
pub async fn list_staff(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AgencyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let staff = service.list_staff(id).await?;
    Ok(Json(ApiResponse::success(Some(staff), None, None)))
}

/// Assign a user to an agency as staff
#[utoipa::path(
    post,
    path = "/api/agencies/{id}/staff",
    params(("id" = Uuid, Path, description = "Agency ID")),
    request_body = AssignStaffDto,
    responses(
        (status = 200, description = "User promoted to agency staff", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Admin accounts cannot be assigned"),
        (status = 404, description = "Agency or user not found")
    ),
    tag = "agencies",
    security(("bearer_auth" = []))
)]
pub async fn assign_staff(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AgencyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AssignStaffDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.assign_staff(id, dto.user_id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Remove a staff member from an agency
#[utoipa::path(
    delete,
    path = "/api/agencies/{id}/staff/{user_id}",
    params(
        ("id" = Uuid, Path, description = "Agency ID"),
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Staff member demoted to citizen", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User is not staff of this agency")
    ),
    tag = "agencies",
    security(("bearer_auth" = []))
)]
pub async fn remove_staff(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AgencyService>>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.remove_staff(id, user_id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}
