use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reviews::models::Review;

/// Request DTO for submitting a public review.
///
/// No authentication; the submitter supplies a display name.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub comment: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

/// Response DTO for review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponseDto {
    pub id: Uuid,
    pub name: String,
    pub comment: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponseDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            name: r.name,
            comment: r.comment,
            rating: r.rating,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_range_fails_validation() {
        let dto = CreateReviewDto {
            name: "Ana".to_string(),
            comment: "Quick resolution".to_string(),
            rating: 6,
        };
        assert!(dto.validate().is_err());

        let dto = CreateReviewDto {
            rating: 0,
            ..dto
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn valid_review_passes_validation() {
        let dto = CreateReviewDto {
            name: "Ana".to_string(),
            comment: "Quick resolution".to_string(),
            rating: 5,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn visibility_flag_is_not_exposed() {
        let dto: ReviewResponseDto = Review {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            comment: "ok".to_string(),
            rating: 4,
            is_visible: true,
            created_at: Utc::now(),
        }
        .into();
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("isVisible").is_none());
    }
}
