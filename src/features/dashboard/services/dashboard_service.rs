use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Role};
use crate::features::dashboard::dtos::DashboardStatsDto;

/// Scope of the statistics query, derived from the caller's role
enum StatsScope {
    Own(Uuid),
    Agency(Uuid),
    All,
}

/// Role-scoped complaint statistics
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn stats(&self, caller: &AuthenticatedUser) -> Result<DashboardStatsDto> {
        let scope = match caller.role {
            Role::Admin => StatsScope::All,
            Role::AgencyStaff => {
                let agency_id: Option<Option<Uuid>> =
                    sqlx::query_scalar("SELECT agency_id FROM users WHERE id = $1")
                        .bind(caller.user_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| {
                            tracing::error!("Failed to fetch caller agency: {:?}", e);
                            AppError::Database(e)
                        })?;
                let agency_id = agency_id.flatten().ok_or_else(|| {
                    AppError::Forbidden("You are not assigned to an agency".to_string())
                })?;
                StatsScope::Agency(agency_id)
            }
            Role::Citizen => StatsScope::Own(caller.user_id),
        };

        // One aggregate pass; the scope binds decide which rows count
        let (user_filter, agency_filter) = match scope {
            StatsScope::Own(id) => (Some(id), None),
            StatsScope::Agency(id) => (None, Some(id)),
            StatsScope::All => (None, None),
        };

        let row: (i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE c.status = 'pending'),
                COUNT(*) FILTER (WHERE c.status = 'in_progress'),
                COUNT(*) FILTER (WHERE c.status = 'resolved'),
                COUNT(*) FILTER (WHERE c.status = 'rejected'),
                COUNT(*) FILTER (WHERE EXISTS (
                    SELECT 1 FROM complaint_responses cr WHERE cr.complaint_id = c.id
                ))
            FROM complaints c
            WHERE ($1::uuid IS NULL OR c.user_id = $1)
              AND ($2::uuid IS NULL OR c.agency_id = $2)
            "#,
        )
        .bind(user_filter)
        .bind(agency_filter)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute dashboard stats: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DashboardStatsDto::from_counts(
            row.0, row.1, row.2, row.3, row.4, row.5,
        ))
    }
}
