use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::UserResponseDto;
use crate::features::auth::model::{Role, User};

const USER_COLUMNS: &str = "id, full_name, email, password_hash, role, agency_id, \
     is_email_verified, otp_code, otp_expires_at, reset_token_hash, reset_token_expires_at, \
     created_at, updated_at";

/// Admin-only user administration: listing, role changes, manual
/// verification, and account removal.
///
/// Every operation that targets a specific user refuses to act on the
/// calling admin's own account.
pub struct UserService {
    pool: PgPool,
}

/// Self-targeting admin actions are privilege refusals, so they map to 403.
fn ensure_not_self(caller_id: Uuid, target_id: Uuid, message: &str) -> Result<()> {
    if caller_id == target_id {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(())
}

fn ensure_deletable(target_role: Role) -> Result<()> {
    if target_role == Role::Admin {
        return Err(AppError::Forbidden(
            "Admin accounts cannot be deleted".to_string(),
        ));
    }
    Ok(())
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated user listing, newest accounts first.
    /// Returns (users, total_count).
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<UserResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC OFFSET $1 LIMIT $2",
            USER_COLUMNS
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((users.into_iter().map(|u| u.into()).collect(), total))
    }

    /// Change a user's role. Self-demotion is refused so an instance cannot
    /// lose its last admin by accident.
    pub async fn change_role(
        &self,
        caller_id: Uuid,
        target_id: Uuid,
        role: Role,
    ) -> Result<UserResponseDto> {
        ensure_not_self(caller_id, target_id, "You cannot change your own role")?;

        self.require_user(target_id).await?;

        // Agency assignment only makes sense for agency staff
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET role = $1,
                agency_id = CASE WHEN $1 = 'agency_staff'::user_role THEN agency_id ELSE NULL END,
                updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(role)
        .bind(target_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to change user role: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Role changed: user={}, role={}, by={}",
            target_id,
            role,
            caller_id
        );
        Ok(user.into())
    }

    /// Manually mark a user's email as verified, bypassing the OTP flow
    pub async fn verify(&self, caller_id: Uuid, target_id: Uuid) -> Result<UserResponseDto> {
        ensure_not_self(caller_id, target_id, "You cannot verify your own account")?;

        self.require_user(target_id).await?;

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
        .bind(target_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to verify user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("User verified by admin: user={}, by={}", target_id, caller_id);
        Ok(user.into())
    }

    /// Delete a user account. Admin accounts (including the caller's own)
    /// cannot be deleted through this endpoint.
    pub async fn delete(&self, caller_id: Uuid, target_id: Uuid) -> Result<()> {
        ensure_not_self(caller_id, target_id, "You cannot delete your own account")?;

        let user = self.require_user(target_id).await?;
        ensure_deletable(user.role)?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(target_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete user: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("User deleted: user={}, by={}", target_id, caller_id);
        Ok(())
    }

    async fn require_user(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_targeting_is_forbidden_not_bad_request() {
        let id = Uuid::new_v4();
        let result = ensure_not_self(id, id, "You cannot delete your own account");
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn distinct_target_passes_self_check() {
        assert!(ensure_not_self(Uuid::new_v4(), Uuid::new_v4(), "unused").is_ok());
    }

    #[test]
    fn admin_accounts_cannot_be_deleted() {
        assert!(matches!(
            ensure_deletable(Role::Admin),
            Err(AppError::Forbidden(_))
        ));
        assert!(ensure_deletable(Role::Citizen).is_ok());
        assert!(ensure_deletable(Role::AgencyStaff).is_ok());
    }
}
