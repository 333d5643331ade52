use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::agencies::dtos::{AgencyResponseDto, CreateAgencyDto, UpdateAgencyDto};
use crate::features::agencies::models::Agency;
use crate::features::auth::dtos::UserResponseDto;
use crate::features::auth::model::{Role, User};

const AGENCY_COLUMNS: &str =
    "id, name, description, contact_email, contact_phone, is_active, created_at, updated_at";

const USER_COLUMNS: &str = "id, full_name, email, password_hash, role, agency_id, \
     is_email_verified, otp_code, otp_expires_at, reset_token_hash, reset_token_expires_at, \
     created_at, updated_at";

/// Service for agency management and staff assignment
pub struct AgencyService {
    pool: PgPool,
}

impl AgencyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List active agencies (public, used during complaint submission)
    pub async fn list_active(&self) -> Result<Vec<AgencyResponseDto>> {
        let agencies = sqlx::query_as::<_, Agency>(&format!(
            "SELECT {} FROM agencies WHERE is_active = TRUE ORDER BY name",
            AGENCY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list active agencies: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(agencies.into_iter().map(|a| a.into()).collect())
    }

    /// List all agencies including inactive (admin)
    pub async fn list_all(&self) -> Result<Vec<AgencyResponseDto>> {
        let agencies = sqlx::query_as::<_, Agency>(&format!(
            "SELECT {} FROM agencies ORDER BY name",
            AGENCY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list agencies: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(agencies.into_iter().map(|a| a.into()).collect())
    }

    pub async fn create(&self, dto: CreateAgencyDto) -> Result<AgencyResponseDto> {
        let agency = sqlx::query_as::<_, Agency>(&format!(
            r#"
            INSERT INTO agencies (name, description, contact_email, contact_phone)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            AGENCY_COLUMNS
        ))
        .bind(dto.name.trim())
        .bind(&dto.description)
        .bind(&dto.contact_email)
        .bind(&dto.contact_phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("An agency with that name already exists".to_string())
            }
            _ => {
                tracing::error!("Failed to create agency: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Agency created: id={}, name={}", agency.id, agency.name);
        Ok(agency.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateAgencyDto) -> Result<AgencyResponseDto> {
        let agency = sqlx::query_as::<_, Agency>(&format!(
            r#"
            UPDATE agencies
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                contact_email = COALESCE($3, contact_email),
                contact_phone = COALESCE($4, contact_phone),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            AGENCY_COLUMNS
        ))
        .bind(dto.name.as_deref().map(str::trim))
        .bind(&dto.description)
        .bind(&dto.contact_email)
        .bind(&dto.contact_phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update agency: {:?}", e);
            AppError::Database(e)
        })?;

        agency
            .map(|a| a.into())
            .ok_or_else(|| AppError::NotFound("Agency not found".to_string()))
    }

    /// Flip the active flag. Assigned complaints keep their reference.
    pub async fn toggle_active(&self, id: Uuid) -> Result<AgencyResponseDto> {
        let agency = sqlx::query_as::<_, Agency>(&format!(
            r#"
            UPDATE agencies
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            AGENCY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle agency: {:?}", e);
            AppError::Database(e)
        })?;

        agency
            .map(|a| a.into())
            .ok_or_else(|| AppError::NotFound("Agency not found".to_string()))
    }

    /// Hard-delete an agency.
    ///
    /// Refused while complaints reference it. Staff are detached (role back
    /// to citizen, agency cleared) before the row is removed; both steps run
    /// in one transaction so a failure leaves nothing half-done.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let complaint_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM complaints WHERE agency_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count complaints for agency: {:?}", e);
                    AppError::Database(e)
                })?;

        if complaint_count > 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot delete agency with {} associated complaint(s). Reassign or resolve them first",
                complaint_count
            )));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        // Staff detachment must precede the row delete
        let detached = sqlx::query(
            r#"
            UPDATE users
            SET role = 'citizen', agency_id = NULL, updated_at = NOW()
            WHERE agency_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to detach agency staff: {:?}", e);
            AppError::Database(e)
        })?;

        let result = sqlx::query("DELETE FROM agencies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete agency: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            // Nothing to delete; the transaction drop rolls back the detach
            return Err(AppError::NotFound("Agency not found".to_string()));
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit agency deletion: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Agency deleted: id={}, staff_detached={}",
            id,
            detached.rows_affected()
        );
        Ok(())
    }

    /// List the staff members of an agency
    pub async fn list_staff(&self, agency_id: Uuid) -> Result<Vec<UserResponseDto>> {
        self.require_agency(agency_id).await?;

        let staff = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE agency_id = $1 ORDER BY full_name",
            USER_COLUMNS
        ))
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list agency staff: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(staff.into_iter().map(|u| u.into()).collect())
    }

    /// Assign a user to an agency, promoting them to agency staff.
    pub async fn assign_staff(&self, agency_id: Uuid, user_id: Uuid) -> Result<UserResponseDto> {
        self.require_agency(agency_id).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user for staff assignment: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.role == Role::Admin {
            return Err(AppError::BadRequest(
                "Admin accounts cannot be assigned to an agency".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET role = 'agency_staff', agency_id = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(agency_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to assign staff: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Staff assigned: user_id={}, agency_id={}", user_id, agency_id);
        Ok(user.into())
    }

    /// Remove a staff member from an agency: role back to citizen, agency
    /// reference cleared.
    pub async fn remove_staff(&self, agency_id: Uuid, user_id: Uuid) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET role = 'citizen', agency_id = NULL, updated_at = NOW()
            WHERE id = $1 AND agency_id = $2
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to remove staff: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| {
            AppError::NotFound("User is not a staff member of this agency".to_string())
        })?;

        tracing::info!("Staff removed: user_id={}, agency_id={}", user_id, agency_id);
        Ok(user.into())
    }

    async fn require_agency(&self, id: Uuid) -> Result<()> {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM agencies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check agency existence: {:?}", e);
                AppError::Database(e)
            })?;

        exists
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Agency not found".to_string()))
    }
}
