use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reviews::dtos::{CreateReviewDto, ReviewResponseDto};
use crate::features::reviews::models::Review;
use crate::shared::constants::PUBLIC_REVIEW_LIMIT;

/// Public service reviews: anonymous submission and the visible-review feed
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateReviewDto) -> Result<ReviewResponseDto> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (name, comment, rating)
            VALUES ($1, $2, $3)
            RETURNING id, name, comment, rating, is_visible, created_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.comment.trim())
        .bind(dto.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create review: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Review submitted: id={}, rating={}", review.id, review.rating);
        Ok(review.into())
    }

    /// The ten most recent visible reviews, for the public landing page
    pub async fn list_latest(&self) -> Result<Vec<ReviewResponseDto>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, name, comment, rating, is_visible, created_at
            FROM reviews
            WHERE is_visible = TRUE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(PUBLIC_REVIEW_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reviews: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(reviews.into_iter().map(|r| r.into()).collect())
    }
}
