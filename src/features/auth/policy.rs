//! Centralized authorization predicates for complaint access.
//!
//! Every handler that gates on ownership or agency scope goes through the
//! functions here instead of re-deriving the rules inline. The predicates are
//! pure: they take the caller's identity, the caller's agency assignment as
//! loaded at request time, and the target complaint's owner/agency.
//!
//! Rules:
//! - citizens may act only on complaints they own
//! - agency staff may act only on complaints assigned to their own agency;
//!   a staff caller with no agency assignment is denied outright
//! - admins may act on everything

use uuid::Uuid;

use crate::features::auth::model::{AuthenticatedUser, Role};

/// The owner/agency pair of a complaint, the only facts access decisions need.
#[derive(Debug, Clone, Copy)]
pub struct ComplaintRef {
    pub owner_id: Uuid,
    pub agency_id: Uuid,
}

/// May the caller read this complaint?
pub fn can_view_complaint(
    caller: &AuthenticatedUser,
    caller_agency: Option<Uuid>,
    complaint: &ComplaintRef,
) -> bool {
    match caller.role {
        Role::Admin => true,
        Role::Citizen => complaint.owner_id == caller.user_id,
        Role::AgencyStaff => caller_agency == Some(complaint.agency_id),
    }
}

/// May the caller update or delete this complaint?
///
/// Same rule set as viewing: owner, staff of the assigned agency, or admin.
pub fn can_modify_complaint(
    caller: &AuthenticatedUser,
    caller_agency: Option<Uuid>,
    complaint: &ComplaintRef,
) -> bool {
    can_view_complaint(caller, caller_agency, complaint)
}

/// May the caller append a response to this complaint?
///
/// Responses come from the resolving side only: admins, or staff of the
/// agency the complaint is assigned to. Owners never respond to themselves.
pub fn can_respond_to_complaint(
    caller: &AuthenticatedUser,
    caller_agency: Option<Uuid>,
    complaint: &ComplaintRef,
) -> bool {
    match caller.role {
        Role::Admin => true,
        Role::AgencyStaff => caller_agency == Some(complaint.agency_id),
        Role::Citizen => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    fn complaint(owner_id: Uuid, agency_id: Uuid) -> ComplaintRef {
        ComplaintRef {
            owner_id,
            agency_id,
        }
    }

    #[test]
    fn citizen_can_view_own_complaint_only() {
        let citizen = user(Role::Citizen);
        let agency = Uuid::new_v4();

        let own = complaint(citizen.user_id, agency);
        let other = complaint(Uuid::new_v4(), agency);

        assert!(can_view_complaint(&citizen, None, &own));
        assert!(!can_view_complaint(&citizen, None, &other));
    }

    #[test]
    fn staff_scoped_to_own_agency() {
        let staff = user(Role::AgencyStaff);
        let own_agency = Uuid::new_v4();
        let other_agency = Uuid::new_v4();

        let in_scope = complaint(Uuid::new_v4(), own_agency);
        let out_of_scope = complaint(Uuid::new_v4(), other_agency);

        assert!(can_view_complaint(&staff, Some(own_agency), &in_scope));
        assert!(!can_view_complaint(&staff, Some(own_agency), &out_of_scope));
    }

    #[test]
    fn staff_without_agency_denied_even_with_staff_role() {
        let staff = user(Role::AgencyStaff);
        let target = complaint(Uuid::new_v4(), Uuid::new_v4());

        assert!(!can_view_complaint(&staff, None, &target));
        assert!(!can_respond_to_complaint(&staff, None, &target));
    }

    #[test]
    fn admin_has_full_access() {
        let admin = user(Role::Admin);
        let target = complaint(Uuid::new_v4(), Uuid::new_v4());

        assert!(can_view_complaint(&admin, None, &target));
        assert!(can_modify_complaint(&admin, None, &target));
        assert!(can_respond_to_complaint(&admin, None, &target));
    }

    #[test]
    fn citizen_cannot_respond_even_to_own_complaint() {
        let citizen = user(Role::Citizen);
        let own = complaint(citizen.user_id, Uuid::new_v4());

        assert!(!can_respond_to_complaint(&citizen, None, &own));
    }

    #[test]
    fn staff_can_modify_in_scope_complaint_owned_by_someone_else() {
        let staff = user(Role::AgencyStaff);
        let agency = Uuid::new_v4();
        let target = complaint(Uuid::new_v4(), agency);

        assert!(can_modify_complaint(&staff, Some(agency), &target));
    }
}
