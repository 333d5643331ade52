use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reviews::dtos::{CreateReviewDto, ReviewResponseDto};
use crate::features::reviews::services::ReviewService;
use crate::shared::types::ApiResponse;

/// Submit a public review
#[utoipa::path(
    post,
    path = "/api/reviews/submit",
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review submitted", body = ApiResponse<ReviewResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(service): State<Arc<ReviewService>>,
    AppJson(dto): AppJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let review = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(review),
            Some("Thank you for your feedback".to_string()),
            None,
        )),
    ))
}

/// Latest visible reviews
#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "Ten most recent visible reviews", body = ApiResponse<Vec<ReviewResponseDto>>)
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(service): State<Arc<ReviewService>>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let reviews = service.list_latest().await?;
    Ok(Json(ApiResponse::success(Some(reviews), None, None)))
}
