use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, ForgotPasswordRequestDto, LoginRequestDto, RegisterRequestDto,
    ResendOtpRequestDto, ResetPasswordRequestDto, UserResponseDto, VerifyOtpRequestDto,
};
use crate::features::auth::model::User;
use crate::features::auth::services::{otp, password, TokenService};
use crate::modules::email::Mailer;

/// Generic credential failure message, identical for unknown email and wrong
/// password so responses cannot be used to enumerate accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Generic forgot-password acknowledgement, returned whether or not the
/// email resolves to an account.
const RESET_REQUESTED: &str = "If that email is registered, a reset link has been sent";

const USER_COLUMNS: &str = "id, full_name, email, password_hash, role, agency_id, \
     is_email_verified, otp_code, otp_expires_at, reset_token_hash, reset_token_expires_at, \
     created_at, updated_at";

/// Service for registration, login, email verification, and credential reset
pub struct AuthService {
    pool: PgPool,
    config: AuthConfig,
    tokens: Arc<TokenService>,
    mailer: Arc<Mailer>,
}

impl AuthService {
    pub fn new(
        pool: PgPool,
        config: AuthConfig,
        tokens: Arc<TokenService>,
        mailer: Arc<Mailer>,
    ) -> Self {
        Self {
            pool,
            config,
            tokens,
            mailer,
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by email: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(user)
    }

    fn otp_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::seconds(self.config.otp_ttl.as_secs() as i64)
    }

    /// Register a new unverified citizen account and send the first OTP.
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<UserResponseDto> {
        let email = dto.email.trim().to_lowercase();

        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = password::hash_password(&dto.password)?;
        let otp_code = otp::generate_otp();
        let otp_expires_at = self.otp_expiry();

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (full_name, email, password_hash, otp_code, otp_expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(dto.full_name.trim())
        .bind(&email)
        .bind(&password_hash)
        .bind(&otp_code)
        .bind(otp_expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("User registered: id={}, email={}", user.id, user.email);

        if let Err(e) = self
            .mailer
            .send_otp_email(&user.email, &user.full_name, &otp_code)
            .await
        {
            tracing::warn!("Failed to send OTP email to {}: {}", user.email, e);
        }

        Ok(user.into())
    }

    /// Log in with email and password.
    ///
    /// Unverified accounts get a fresh OTP instead of a token; the 403
    /// body carries a `requiresVerification` flag so the client knows to
    /// redirect to the verification screen.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let email = dto.email.trim().to_lowercase();

        let user = self
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !password::verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_email_verified {
            self.issue_fresh_otp(&user).await?;
            return Err(AppError::EmailNotVerified(
                "Email not verified. A new verification code has been sent".to_string(),
            ));
        }

        let access_token = self.tokens.issue(user.id, user.role)?;
        tracing::info!("User logged in: id={}", user.id);

        Ok(AuthResponseDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.expires_in_secs(),
            user: user.into(),
        })
    }

    /// Verify the emailed OTP. Wrong and expired codes fail distinctly.
    pub async fn verify_otp(&self, dto: VerifyOtpRequestDto) -> Result<AuthResponseDto> {
        let email = dto.email.trim().to_lowercase();

        let user = self
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.is_email_verified {
            return Err(AppError::BadRequest("Email is already verified".to_string()));
        }

        otp::check_otp(
            user.otp_code.as_deref(),
            user.otp_expires_at,
            &dto.otp,
            Utc::now(),
        )?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_email_verified = TRUE,
                otp_code = NULL,
                otp_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark user verified: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Email verified: user_id={}", user.id);

        let access_token = self.tokens.issue(user.id, user.role)?;
        Ok(AuthResponseDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.expires_in_secs(),
            user: user.into(),
        })
    }

    /// Issue a fresh OTP for an unverified account, invalidating any
    /// outstanding code.
    pub async fn resend_otp(&self, dto: ResendOtpRequestDto) -> Result<()> {
        let email = dto.email.trim().to_lowercase();

        let user = self
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.is_email_verified {
            return Err(AppError::BadRequest("Email is already verified".to_string()));
        }

        self.issue_fresh_otp(&user).await?;
        Ok(())
    }

    async fn issue_fresh_otp(&self, user: &User) -> Result<()> {
        let otp_code = otp::generate_otp();
        let otp_expires_at = self.otp_expiry();

        sqlx::query(
            r#"
            UPDATE users
            SET otp_code = $1, otp_expires_at = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&otp_code)
        .bind(otp_expires_at)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store fresh OTP: {:?}", e);
            AppError::Database(e)
        })?;

        if let Err(e) = self
            .mailer
            .send_otp_email(&user.email, &user.full_name, &otp_code)
            .await
        {
            tracing::warn!("Failed to send OTP email to {}: {}", user.email, e);
        }

        Ok(())
    }

    /// Start a password reset. The response message is the same whether or
    /// not the email exists.
    pub async fn forgot_password(&self, dto: ForgotPasswordRequestDto) -> Result<String> {
        let email = dto.email.trim().to_lowercase();

        let Some(user) = self.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(RESET_REQUESTED.to_string());
        };

        let raw_token = otp::generate_reset_token();
        let token_hash = otp::hash_reset_token(&raw_token);
        let expires_at =
            Utc::now() + Duration::seconds(self.config.reset_token_ttl.as_secs() as i64);

        sqlx::query(
            r#"
            UPDATE users
            SET reset_token_hash = $1, reset_token_expires_at = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&token_hash)
        .bind(expires_at)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store reset token: {:?}", e);
            AppError::Database(e)
        })?;

        if let Err(e) = self
            .mailer
            .send_password_reset_email(&user.email, &raw_token)
            .await
        {
            tracing::warn!("Failed to send reset email to {}: {}", user.email, e);
        }

        Ok(RESET_REQUESTED.to_string())
    }

    /// Complete a password reset with the emailed token.
    ///
    /// The token is single-use: both stored fields are cleared on success,
    /// so presenting the same token again fails.
    pub async fn reset_password(&self, dto: ResetPasswordRequestDto) -> Result<()> {
        let token_hash = otp::hash_reset_token(dto.token.trim());

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE reset_token_hash = $1",
            USER_COLUMNS
        ))
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up reset token: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".to_string()))?;

        otp::check_reset_token(
            user.reset_token_hash.as_deref(),
            user.reset_token_expires_at,
            dto.token.trim(),
            Utc::now(),
        )?;

        let password_hash = password::hash_password(&dto.new_password)?;

        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $1,
                reset_token_hash = NULL,
                reset_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(&password_hash)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to reset password: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Password reset completed: user_id={}", user.id);
        Ok(())
    }

    /// Current user profile for GET /api/auth/me.
    pub async fn get_current_user(&self, user_id: Uuid) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch current user: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}
