use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::PHONE_REGEX;

/// Request DTO for creating an agency
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgencyDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    #[validate(email(message = "Invalid contact email format"))]
    pub contact_email: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid contact phone number"))]
    pub contact_phone: Option<String>,
}

/// Request DTO for updating an agency
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgencyDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    #[validate(email(message = "Invalid contact email format"))]
    pub contact_email: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid contact phone number"))]
    pub contact_phone: Option<String>,
}

/// Request DTO for assigning a staff member to an agency
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignStaffDto {
    pub user_id: Uuid,
}

/// Response DTO for agency
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgencyResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_agency_rejects_bad_phone() {
        let dto = CreateAgencyDto {
            name: "Public Works".to_string(),
            description: None,
            contact_email: None,
            contact_phone: Some("not-a-phone".to_string()),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_agency_accepts_valid_contacts() {
        let dto = CreateAgencyDto {
            name: "Public Works".to_string(),
            description: Some("Roads and drainage".to_string()),
            contact_email: Some("works@city.gov".to_string()),
            contact_phone: Some("+6281234567890".to_string()),
        };
        assert!(dto.validate().is_ok());
    }
}
