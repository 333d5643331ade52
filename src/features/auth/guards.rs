//! Role-based authorization guards.
//!
//! These guards extract the authenticated user and verify the role gate
//! before the handler body runs. Ownership and agency-scope checks that need
//! database state live in [`crate::features::auth::policy`] and run inside
//! the services.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authenticated_user(parts: &Parts) -> Result<AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

/// Guard for admin-only endpoints.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user))
    }
}

/// Guard for agency-staff-only endpoints.
///
/// Checks the role gate only; whether the staff user actually has an agency
/// assignment is verified at request time inside the service, so a staff
/// account with no agency receives a capability error rather than a 500.
pub struct RequireAgencyStaff(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAgencyStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.is_agency_staff() {
            return Err(AppError::Forbidden(
                "Agency staff access required".to_string(),
            ));
        }

        Ok(RequireAgencyStaff(user))
    }
}

/// Guard for endpoints shared by admins and agency staff
/// (category active-state toggling, complaint responses).
pub struct RequireStaffOrAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStaffOrAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.is_admin() && !user.is_agency_staff() {
            return Err(AppError::Forbidden(
                "Admin or agency staff access required".to_string(),
            ));
        }

        Ok(RequireStaffOrAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    use crate::features::auth::model::Role;
    use crate::shared::test_helpers::{create_test_user, with_admin_auth, with_auth};

    async fn admin_only(RequireAdmin(_user): RequireAdmin) -> StatusCode {
        StatusCode::OK
    }

    async fn staff_only(RequireAgencyStaff(_user): RequireAgencyStaff) -> StatusCode {
        StatusCode::OK
    }

    async fn staff_or_admin(RequireStaffOrAdmin(_user): RequireStaffOrAdmin) -> StatusCode {
        StatusCode::OK
    }

    fn app() -> Router {
        Router::new()
            .route("/admin", get(admin_only))
            .route("/staff", get(staff_only))
            .route("/either", get(staff_or_admin))
    }

    #[tokio::test]
    async fn admin_passes_every_gate_except_staff_only() {
        let server = TestServer::new(with_admin_auth(app())).unwrap();

        server.get("/admin").await.assert_status_ok();
        server.get("/either").await.assert_status_ok();
        server
            .get("/staff")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn citizen_is_forbidden_from_all_gates() {
        let citizen = create_test_user(Role::Citizen);
        let server = TestServer::new(with_auth(app(), citizen)).unwrap();

        server
            .get("/admin")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .get("/staff")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .get("/either")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn staff_passes_staff_gates_but_not_admin() {
        let staff = create_test_user(Role::AgencyStaff);
        let server = TestServer::new(with_auth(app(), staff)).unwrap();

        server.get("/staff").await.assert_status_ok();
        server.get("/either").await.assert_status_ok();
        server
            .get("/admin")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let server = TestServer::new(app()).unwrap();

        server
            .get("/admin")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
