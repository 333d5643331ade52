use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::agencies::dtos::AgencyResponseDto;
use crate::features::agencies::services::AgencyService;
use crate::features::auth::guards::{RequireAdmin, RequireAgencyStaff, RequireStaffOrAdmin};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::services::CategoryService;
use crate::features::complaints::dtos::{
    ComplaintDetailDto, ComplaintFilterQuery, ComplaintResponseDto, CreateComplaintDto,
    RespondComplaintDto, UpdateComplaintDto,
};
use crate::features::complaints::services::ComplaintService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

// ============================================================================
// Public lookups for the complaint form
// ============================================================================

/// Active categories, for the public complaint form
#[utoipa::path(
    get,
    path = "/api/complaints/categories",
    responses(
        (status = 200, description = "Active categories", body = ApiResponse<Vec<CategoryResponseDto>>)
    ),
    tag = "complaints"
)]
pub async fn list_form_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_active().await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

/// Active agencies, for the public complaint form
#[utoipa::path(
    get,
    path = "/api/complaints/agencies",
    responses(
        (status = 200, description = "Active agencies", body = ApiResponse<Vec<AgencyResponseDto>>)
    ),
    tag = "complaints"
)]
pub async fn list_form_agencies(
    State(service): State<Arc<AgencyService>>,
) -> Result<Json<ApiResponse<Vec<AgencyResponseDto>>>> {
    let agencies = service.list_active().await?;
    Ok(Json(ApiResponse::success(Some(agencies), None, None)))
}

// ============================================================================
// Complaint lifecycle
// ============================================================================

/// File a new complaint
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintDto,
    responses(
        (status = 201, description = "Complaint filed", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category or agency not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn create_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    AppJson(dto): AppJson<CreateComplaintDto>,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let complaint = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(complaint),
            Some("Complaint submitted".to_string()),
            None,
        )),
    ))
}

/// List the caller's own complaints
#[utoipa::path(
    get,
    path = "/api/complaints/my-complaints",
    responses(
        (status = 200, description = "Own complaints, newest first", body = ApiResponse<Vec<ComplaintResponseDto>>)
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_my_complaints(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list_mine(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(complaints), None, None)))
}

/// All complaints across the system (admin), paginated with optional status filter
#[utoipa::path(
    get,
    path = "/api/complaints/all",
    params(PaginationQuery, ComplaintFilterQuery),
    responses(
        (status = 200, description = "All complaints", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_all_complaints(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Query(pagination): Query<PaginationQuery>,
    Query(filter): Query<ComplaintFilterQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let (complaints, total) = service
        .list_all(filter.status, pagination.offset(), pagination.limit())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(complaints),
        None,
        Some(Meta { total }),
    )))
}

/// Complaints assigned to the caller's agency
#[utoipa::path(
    get,
    path = "/api/complaints/agency",
    responses(
        (status = 200, description = "Agency complaints", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 403, description = "Agency staff access required, or no agency assigned")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_agency_complaints(
    RequireAgencyStaff(user): RequireAgencyStaff,
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list_for_agency(&user).await?;
    Ok(Json(ApiResponse::success(Some(complaints), None, None)))
}

/// One complaint with its response thread
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint detail", body = ApiResponse<ComplaintDetailDto>),
        (status = 404, description = "Complaint not found or not visible to the caller")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn get_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ComplaintDetailDto>>> {
    let detail = service.get(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Update a complaint
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = UpdateComplaintDto,
    responses(
        (status = 200, description = "Complaint updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 403, description = "Not the owner, assigned staff, or admin"),
        (status = 404, description = "Complaint or target agency not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn update_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateComplaintDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let complaint = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

/// Delete a complaint
#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint deleted"),
        (status = 403, description = "Not the owner, assigned staff, or admin"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn delete_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Complaint deleted".to_string()),
        None,
    )))
}

/// Append a response, optionally updating the status in the same step
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/respond",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = RespondComplaintDto,
    responses(
        (status = 201, description = "Response appended", body = ApiResponse<ComplaintDetailDto>),
        (status = 403, description = "Only admins or staff of the assigned agency can respond"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn respond_to_complaint(
    RequireStaffOrAdmin(user): RequireStaffOrAdmin,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RespondComplaintDto>,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintDetailDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let detail = service.respond(&user, id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(detail),
            Some("Response recorded".to_string()),
            None,
        )),
    ))
}
