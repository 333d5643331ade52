use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AuthResponseDto, ForgotPasswordRequestDto, LoginRequestDto, RegisterRequestDto,
    ResendOtpRequestDto, ResetPasswordRequestDto, UserResponseDto, VerifyOtpRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Register a new citizen account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered, verification code sent", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user),
            Some("Registration successful. Check your email for the verification code".to_string()),
            None,
        )),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Email not verified, new code sent; body carries requiresVerification")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth_response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

/// Verify email with the one-time code
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    request_body = VerifyOtpRequestDto,
    responses(
        (status = 200, description = "Email verified", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Invalid or expired code"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn verify_otp(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<VerifyOtpRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth_response = service.verify_otp(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(auth_response),
        Some("Email verified successfully".to_string()),
        None,
    )))
}

/// Resend the verification code
#[utoipa::path(
    post,
    path = "/api/auth/resend-otp",
    request_body = ResendOtpRequestDto,
    responses(
        (status = 200, description = "New verification code sent"),
        (status = 400, description = "Email already verified"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn resend_otp(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ResendOtpRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.resend_otp(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("A new verification code has been sent".to_string()),
        None,
    )))
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequestDto,
    responses(
        (status = 200, description = "Reset link sent if the email is registered"),
        (status = 400, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ForgotPasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = service.forgot_password(dto).await?;
    Ok(Json(ApiResponse::success(None, Some(message), None)))
}

/// Complete a password reset with the emailed token
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequestDto,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Invalid or expired reset token")
    ),
    tag = "auth"
)]
pub async fn reset_password(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ResetPasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.reset_password(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password has been reset. You can now log in".to_string()),
        None,
    )))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user_data = service.get_current_user(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(user_data), None, None)))
}
