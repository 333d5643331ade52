use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::{Role, User};
use crate::shared::validation::OTP_REGEX;

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for OTP verification
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = *OTP_REGEX, message = "Verification code must be 6 digits"))]
    pub otp: String,
}

/// Request DTO for resending the verification code
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request DTO for requesting a password reset
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request DTO for completing a password reset
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequestDto {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Public user profile returned by auth and user-management endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<Uuid>,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            role: u.role,
            agency_id: u.agency_id,
            is_email_verified: u.is_email_verified,
            created_at: u.created_at,
        }
    }
}

/// Response DTO for successful authentication (login / OTP verification)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    /// Signed bearer token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    pub user: UserResponseDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn user_dto_hides_credential_material() {
        // UserResponseDto carries no password hash, otp, or reset token
        // fields; serializing must expose only the public profile.
        let user = User {
            id: Uuid::new_v4(),
            full_name: "Test User".to_string(),
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: Role::Citizen,
            agency_id: None,
            is_email_verified: false,
            otp_code: Some("123456".to_string()),
            otp_expires_at: Some(Utc::now()),
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponseDto::from(user)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("otpCode").is_none());
        assert!(json.get("resetTokenHash").is_none());
        assert_eq!(json["role"], "citizen");
    }

    #[test]
    fn register_dto_rejects_short_password() {
        let dto = RegisterRequestDto {
            full_name: "A".to_string(),
            email: "a@x.com".to_string(),
            password: "short".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn verify_otp_dto_requires_six_digits() {
        let dto = VerifyOtpRequestDto {
            email: "a@x.com".to_string(),
            otp: "12345".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = VerifyOtpRequestDto {
            email: "a@x.com".to_string(),
            otp: "12a456".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = VerifyOtpRequestDto {
            email: "a@x.com".to_string(),
            otp: "123456".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
