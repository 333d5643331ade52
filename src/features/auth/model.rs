use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// User role enum matching the `user_role` database enum.
///
/// Roles are mutually exclusive: a user holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Citizen,
    Admin,
    AgencyStaff,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Citizen => write!(f, "citizen"),
            Role::Admin => write!(f, "admin"),
            Role::AgencyStaff => write!(f, "agency_staff"),
        }
    }
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn is_agency_staff(&self) -> bool {
        matches!(self, Role::AgencyStaff)
    }
}

/// Database model for user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub agency_id: Option<Uuid>,
    pub is_email_verified: bool,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity decoded from a verified bearer token.
///
/// Carries only what the token encodes: user id and role. Agency
/// membership is looked up from the database at request time where a
/// decision depends on it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_agency_staff(&self) -> bool {
        self.role.is_agency_staff()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::AgencyStaff).unwrap(),
            "\"agency_staff\""
        );
        assert_eq!(serde_json::to_string(&Role::Citizen).unwrap(), "\"citizen\"");
    }

    #[test]
    fn role_display_matches_wire_format() {
        assert_eq!(Role::AgencyStaff.to_string(), "agency_staff");
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
