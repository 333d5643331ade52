use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::{self, ComplaintRef};
use crate::features::complaints::dtos::{
    ComplaintDetailDto, ComplaintResponseDto, CreateComplaintDto, RespondComplaintDto,
    ResponseItemDto, UpdateComplaintDto,
};
use crate::features::complaints::models::{
    Complaint, ComplaintPriority, ComplaintResponseWithAuthor, ComplaintStatus,
};
use crate::modules::email::Mailer;

const COMPLAINT_COLUMNS: &str = "id, user_id, category_id, agency_id, title, description, \
     status, priority, location, attachments, created_at, updated_at";

/// Service for complaint lifecycle: filing, listing, updates, deletion, and
/// the response thread.
///
/// Authorization decisions delegate to [`crate::features::auth::policy`];
/// this service only loads the facts those predicates need.
pub struct ComplaintService {
    pool: PgPool,
    mailer: Arc<Mailer>,
}

impl ComplaintService {
    pub fn new(pool: PgPool, mailer: Arc<Mailer>) -> Self {
        Self { pool, mailer }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// File a new complaint. Category and agency must resolve; status is
    /// always `pending` regardless of the request body.
    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        dto: CreateComplaintDto,
    ) -> Result<ComplaintResponseDto> {
        let category_exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM categories WHERE id = $1")
                .bind(dto.category_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check category: {:?}", e);
                    AppError::Database(e)
                })?;
        if category_exists.is_none() {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        let agency: Option<(String, Option<String>)> =
            sqlx::query_as("SELECT name, contact_email FROM agencies WHERE id = $1")
                .bind(dto.agency_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check agency: {:?}", e);
                    AppError::Database(e)
                })?;
        let Some((agency_name, agency_contact)) = agency else {
            return Err(AppError::NotFound("Agency not found".to_string()));
        };

        let priority = dto.priority.unwrap_or(ComplaintPriority::Medium);
        let attachments = dto.attachments.unwrap_or_default();

        let complaint = sqlx::query_as::<_, Complaint>(&format!(
            r#"
            INSERT INTO complaints
                (user_id, category_id, agency_id, title, description, priority, location, attachments)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            COMPLAINT_COLUMNS
        ))
        .bind(caller.user_id)
        .bind(dto.category_id)
        .bind(dto.agency_id)
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(priority)
        .bind(&dto.location)
        .bind(&attachments)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create complaint: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Complaint created: id={}, owner={}, agency={}",
            complaint.id,
            caller.user_id,
            complaint.agency_id
        );

        // Best-effort notifications; the complaint stands regardless
        if let Some(owner_email) = self.user_email(caller.user_id).await {
            if let Err(e) = self
                .mailer
                .send_complaint_received_email(&owner_email, &complaint.title)
                .await
            {
                tracing::warn!("Failed to send received email: {}", e);
            }
        }
        if let Some(contact) = agency_contact {
            if let Err(e) = self
                .mailer
                .send_agency_notification_email(&contact, &agency_name, &complaint.title)
                .await
            {
                tracing::warn!("Failed to notify agency {}: {}", agency_name, e);
            }
        }

        Ok(complaint.into())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// List the caller's own complaints, newest first
    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<ComplaintResponseDto>> {
        let complaints = sqlx::query_as::<_, Complaint>(&format!(
            "SELECT {} FROM complaints WHERE user_id = $1 ORDER BY created_at DESC",
            COMPLAINT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list own complaints: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(complaints.into_iter().map(|c| c.into()).collect())
    }

    /// Fetch one complaint with its response thread.
    ///
    /// Unauthorized callers get 404, not 403, so the response does not leak
    /// whether the id exists.
    pub async fn get(&self, caller: &AuthenticatedUser, id: Uuid) -> Result<ComplaintDetailDto> {
        let complaint = self.find_complaint(id).await?;
        let caller_agency = self.caller_agency(caller).await?;

        let target = ComplaintRef {
            owner_id: complaint.user_id,
            agency_id: complaint.agency_id,
        };
        if !policy::can_view_complaint(caller, caller_agency, &target) {
            return Err(AppError::NotFound("Complaint not found".to_string()));
        }

        let responses = self.load_responses(id).await?;
        Ok(ComplaintDetailDto {
            complaint: complaint.into(),
            responses,
        })
    }

    /// Admin-wide complaint listing with optional status filter.
    /// Returns (complaints, total_count).
    pub async fn list_all(
        &self,
        status: Option<ComplaintStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ComplaintResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM complaints WHERE ($1::complaint_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count complaints: {:?}", e);
            AppError::Database(e)
        })?;

        let complaints = sqlx::query_as::<_, Complaint>(&format!(
            r#"
            SELECT {}
            FROM complaints
            WHERE ($1::complaint_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
            COMPLAINT_COLUMNS
        ))
        .bind(status)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list complaints: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((complaints.into_iter().map(|c| c.into()).collect(), total))
    }

    /// Complaints assigned to the caller's agency.
    ///
    /// A staff account with no agency is a capability error, checked here at
    /// request time rather than trusted from the token.
    pub async fn list_for_agency(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<ComplaintResponseDto>> {
        let agency_id = self
            .caller_agency(caller)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("You are not assigned to an agency".to_string())
            })?;

        let complaints = sqlx::query_as::<_, Complaint>(&format!(
            "SELECT {} FROM complaints WHERE agency_id = $1 ORDER BY created_at DESC",
            COMPLAINT_COLUMNS
        ))
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list agency complaints: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(complaints.into_iter().map(|c| c.into()).collect())
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Update a complaint (owner, staff of its agency, or admin).
    ///
    /// Statuses are permissive: any of the four values may be set in any
    /// order. Reassigning requires the target agency to exist.
    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateComplaintDto,
    ) -> Result<ComplaintResponseDto> {
        let complaint = self.find_complaint(id).await?;
        let caller_agency = self.caller_agency(caller).await?;

        let target = ComplaintRef {
            owner_id: complaint.user_id,
            agency_id: complaint.agency_id,
        };
        if !policy::can_modify_complaint(caller, caller_agency, &target) {
            return Err(AppError::Forbidden(
                "You do not have access to this complaint".to_string(),
            ));
        }

        if let Some(new_agency) = dto.agency_id {
            let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM agencies WHERE id = $1")
                .bind(new_agency)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check agency for reassignment: {:?}", e);
                    AppError::Database(e)
                })?;
            if exists.is_none() {
                return Err(AppError::NotFound("Agency not found".to_string()));
            }
        }

        let status_changed = dto
            .status
            .map(|s| s != complaint.status)
            .unwrap_or(false);

        let updated = sqlx::query_as::<_, Complaint>(&format!(
            r#"
            UPDATE complaints
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                status = COALESCE($3, status),
                priority = COALESCE($4, priority),
                agency_id = COALESCE($5, agency_id),
                location = COALESCE($6, location),
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            COMPLAINT_COLUMNS
        ))
        .bind(dto.title.as_deref().map(str::trim))
        .bind(&dto.description)
        .bind(dto.status)
        .bind(dto.priority)
        .bind(dto.agency_id)
        .bind(&dto.location)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update complaint: {:?}", e);
            AppError::Database(e)
        })?;

        // Owners already know what they changed; notify on staff/admin edits
        if status_changed && caller.user_id != updated.user_id {
            if let Some(owner_email) = self.user_email(updated.user_id).await {
                if let Err(e) = self
                    .mailer
                    .send_status_update_email(
                        &owner_email,
                        &updated.title,
                        &updated.status.to_string(),
                    )
                    .await
                {
                    tracing::warn!("Failed to send status email: {}", e);
                }
            }
        }

        Ok(updated.into())
    }

    /// Delete a complaint (owner, staff of its agency, or admin)
    pub async fn delete(&self, caller: &AuthenticatedUser, id: Uuid) -> Result<()> {
        let complaint = self.find_complaint(id).await?;
        let caller_agency = self.caller_agency(caller).await?;

        let target = ComplaintRef {
            owner_id: complaint.user_id,
            agency_id: complaint.agency_id,
        };
        if !policy::can_modify_complaint(caller, caller_agency, &target) {
            return Err(AppError::Forbidden(
                "You do not have access to this complaint".to_string(),
            ));
        }

        sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete complaint: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Complaint deleted: id={}, by={}", id, caller.user_id);
        Ok(())
    }

    // ========================================================================
    // Responses
    // ========================================================================

    /// Append a response (admin, or staff of the complaint's agency).
    ///
    /// When a status is supplied and differs from the current one it is
    /// persisted in the same transaction as the response row.
    pub async fn respond(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
        dto: RespondComplaintDto,
    ) -> Result<ComplaintDetailDto> {
        let complaint = self.find_complaint(id).await?;
        let caller_agency = self.caller_agency(caller).await?;

        let target = ComplaintRef {
            owner_id: complaint.user_id,
            agency_id: complaint.agency_id,
        };
        if !policy::can_respond_to_complaint(caller, caller_agency, &target) {
            return Err(AppError::Forbidden(
                "Only admins or staff of the assigned agency can respond".to_string(),
            ));
        }

        let new_status = dto.status.filter(|s| *s != complaint.status);

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query(
            "INSERT INTO complaint_responses (complaint_id, responder_id, message) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(caller.user_id)
        .bind(dto.response.trim())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert response: {:?}", e);
            AppError::Database(e)
        })?;

        let complaint = if let Some(status) = new_status {
            sqlx::query_as::<_, Complaint>(&format!(
                "UPDATE complaints SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
                COMPLAINT_COLUMNS
            ))
            .bind(status)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update status with response: {:?}", e);
                AppError::Database(e)
            })?
        } else {
            complaint
        };

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit response: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Response added: complaint={}, responder={}, status_change={}",
            id,
            caller.user_id,
            new_status.is_some()
        );

        if let Some(owner_email) = self.user_email(complaint.user_id).await {
            if let Err(e) = self
                .mailer
                .send_response_email(&owner_email, &complaint.title, dto.response.trim())
                .await
            {
                tracing::warn!("Failed to send response email: {}", e);
            }
        }

        let responses = self.load_responses(id).await?;
        Ok(ComplaintDetailDto {
            complaint: complaint.into(),
            responses,
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn find_complaint(&self, id: Uuid) -> Result<Complaint> {
        sqlx::query_as::<_, Complaint>(&format!(
            "SELECT {} FROM complaints WHERE id = $1",
            COMPLAINT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch complaint: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))
    }

    /// The caller's agency assignment as stored right now, for staff scope
    /// checks. Non-staff roles never have one.
    async fn caller_agency(&self, caller: &AuthenticatedUser) -> Result<Option<Uuid>> {
        if !caller.is_agency_staff() {
            return Ok(None);
        }

        let agency_id: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT agency_id FROM users WHERE id = $1")
                .bind(caller.user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch caller agency: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(agency_id.flatten())
    }

    async fn load_responses(&self, complaint_id: Uuid) -> Result<Vec<ResponseItemDto>> {
        let responses = sqlx::query_as::<_, ComplaintResponseWithAuthor>(
            r#"
            SELECT cr.id, cr.complaint_id, cr.responder_id, u.full_name AS responder_name,
                   cr.message, cr.created_at
            FROM complaint_responses cr
            JOIN users u ON u.id = cr.responder_id
            WHERE cr.complaint_id = $1
            ORDER BY cr.created_at
            "#,
        )
        .bind(complaint_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load responses: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(responses.into_iter().map(|r| r.into()).collect())
    }

    /// Look up an email for notifications; failures are swallowed because
    /// notifications are best-effort.
    async fn user_email(&self, user_id: Uuid) -> Option<String> {
        match sqlx::query_scalar::<_, String>("SELECT email FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!("Failed to fetch email for notification: {:?}", e);
                None
            }
        }
    }
}
