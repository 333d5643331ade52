use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::model::Role;

/// Request DTO for an admin role change.
///
/// Moving someone out of `agency_staff` clears their agency assignment on
/// the server side; moving them into it leaves the assignment empty until
/// the agency endpoints set one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleDto {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_deserializes_from_snake_case() {
        let dto: UpdateUserRoleDto =
            serde_json::from_value(serde_json::json!({"role": "agency_staff"})).unwrap();
        assert_eq!(dto.role, Role::AgencyStaff);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: Result<UpdateUserRoleDto, _> =
            serde_json::from_value(serde_json::json!({"role": "superuser"}));
        assert!(result.is_err());
    }
}
