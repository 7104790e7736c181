//! Role and permission evaluator.
//!
//! All authorization decisions are stateless predicates over the resolved
//! [`Principal`]; endpoints call these instead of repeating ad hoc role-list
//! checks. The role-mutation rules live here too so the privilege-escalation
//! guard has a single home.

use crate::modules::auth::model::Principal;
use crate::modules::users::model::StaffRole;
use crate::utils::errors::AppError;

/// Subrole granting every admin capability.
pub const SUBROLE_ALL: &str = "all";
/// Subrole granting subject and timetable management.
pub const SUBROLE_TIMETABLE_MANAGER: &str = "timetable_manager";
/// Legacy spelling still honoured for timetable access.
pub const SUBROLE_TIMETABLING: &str = "timetabling";
/// Subrole letting an admin act as teaching staff.
pub const SUBROLE_TEACHER: &str = "teacher";

pub fn require_any_role(principal: &Principal, allowed: &[StaffRole]) -> Result<(), AppError> {
    if !allowed.contains(&principal.role) {
        return Err(AppError::forbidden(
            "Insufficient permissions for this operation".to_string(),
        ));
    }
    Ok(())
}

fn has_subrole(principal: &Principal, name: &str) -> bool {
    principal.subroles.iter().any(|s| s == name)
}

/// Super admins, or admins holding the `timetable_manager` or `all` subrole.
pub fn is_subject_manager(principal: &Principal) -> bool {
    match principal.role {
        StaffRole::SuperAdmin => true,
        StaffRole::Admin => {
            has_subrole(principal, SUBROLE_TIMETABLE_MANAGER) || has_subrole(principal, SUBROLE_ALL)
        }
        _ => false,
    }
}

pub fn require_subject_manager(principal: &Principal) -> Result<(), AppError> {
    if !is_subject_manager(principal) {
        return Err(AppError::forbidden(
            "Access denied. Requires Super Admin or Admin with timetable permissions.".to_string(),
        ));
    }
    Ok(())
}

/// Subject managers plus the legacy `timetabling` tag.
pub fn is_timetable_manager(principal: &Principal) -> bool {
    is_subject_manager(principal)
        || (principal.role == StaffRole::Admin && has_subrole(principal, SUBROLE_TIMETABLING))
}

/// Teachers, or admins holding the `teacher` subrole. Enrollment-style
/// operations accept this tier alongside subject managers.
pub fn is_teaching_staff(principal: &Principal) -> bool {
    principal.role == StaffRole::Teacher
        || (principal.role == StaffRole::Admin && has_subrole(principal, SUBROLE_TEACHER))
}

pub fn require_teaching_staff(principal: &Principal) -> Result<(), AppError> {
    if !(is_teaching_staff(principal) || is_subject_manager(principal)) {
        return Err(AppError::forbidden(
            "Access denied. Requires teaching staff privileges.".to_string(),
        ));
    }
    Ok(())
}

/// Validates a role mutation as a total function of
/// (caller role, target's current role, requested role).
///
/// Invariants enforced:
/// - SUPER_ADMIN is immutable, for every caller including SUPER_ADMIN.
/// - SUPER_ADMIN is unreachable after account genesis.
/// - Admin callers may not touch admin or SUPER_ADMIN targets, and may only
///   assign `librarian`, `teacher`, or `none`.
/// - Only SUPER_ADMIN may promote to `admin`.
pub fn validate_role_change(
    caller: StaffRole,
    current: StaffRole,
    requested: StaffRole,
) -> Result<(), AppError> {
    if current == StaffRole::SuperAdmin {
        return Err(AppError::forbidden(
            "The SUPER_ADMIN role cannot be modified by anyone.".to_string(),
        ));
    }

    if requested == StaffRole::SuperAdmin {
        return Err(AppError::forbidden(
            "The SUPER_ADMIN role is assigned at account genesis and cannot be granted."
                .to_string(),
        ));
    }

    match caller {
        StaffRole::SuperAdmin => Ok(()),
        StaffRole::Admin => {
            if matches!(current, StaffRole::Admin) {
                return Err(AppError::forbidden(
                    "Insufficient permissions to modify this user's role.".to_string(),
                ));
            }
            if !matches!(
                requested,
                StaffRole::Librarian | StaffRole::Teacher | StaffRole::Unassigned
            ) {
                return Err(AppError::forbidden(
                    "Admins can only assign 'librarian', 'teacher', or 'none' roles.".to_string(),
                ));
            }
            Ok(())
        }
        _ => Err(AppError::forbidden(
            "Insufficient permissions for this operation".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn principal(role: StaffRole, subroles: &[&str]) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            external_subject_id: Some("ext_1".to_string()),
            email: "staff@school.test".to_string(),
            full_name: "Test Staff".to_string(),
            role,
            subroles: subroles.iter().map(|s| s.to_string()).collect(),
            assigned_class_id: None,
            assigned_stream_id: None,
        }
    }

    #[test]
    fn test_require_any_role() {
        let p = principal(StaffRole::Librarian, &[]);
        assert!(require_any_role(&p, &[StaffRole::Librarian, StaffRole::Admin]).is_ok());
        assert!(require_any_role(&p, &[StaffRole::Admin]).is_err());
    }

    #[test]
    fn test_subject_manager_tiers() {
        assert!(is_subject_manager(&principal(StaffRole::SuperAdmin, &[])));
        assert!(is_subject_manager(&principal(StaffRole::Admin, &["all"])));
        assert!(is_subject_manager(&principal(
            StaffRole::Admin,
            &["timetable_manager"]
        )));
        assert!(!is_subject_manager(&principal(StaffRole::Admin, &["finance"])));
        assert!(!is_subject_manager(&principal(StaffRole::Teacher, &["all"])));
    }

    #[test]
    fn test_timetable_manager_accepts_legacy_tag() {
        assert!(is_timetable_manager(&principal(
            StaffRole::Admin,
            &["timetabling"]
        )));
        assert!(!is_timetable_manager(&principal(StaffRole::Librarian, &[])));
    }

    #[test]
    fn test_teaching_staff_tier() {
        assert!(is_teaching_staff(&principal(StaffRole::Teacher, &[])));
        assert!(is_teaching_staff(&principal(StaffRole::Admin, &["teacher"])));
        assert!(!is_teaching_staff(&principal(StaffRole::Admin, &["finance"])));
        assert!(require_teaching_staff(&principal(StaffRole::SuperAdmin, &[])).is_ok());
    }

    #[test]
    fn test_super_admin_is_immutable_for_everyone() {
        for caller in [StaffRole::SuperAdmin, StaffRole::Admin] {
            let result =
                validate_role_change(caller, StaffRole::SuperAdmin, StaffRole::Unassigned);
            assert!(result.is_err(), "caller {caller} must not touch SUPER_ADMIN");
        }
    }

    #[test]
    fn test_super_admin_is_unreachable_post_genesis() {
        let result =
            validate_role_change(StaffRole::SuperAdmin, StaffRole::Teacher, StaffRole::SuperAdmin);
        assert!(result.is_err());
    }

    #[test]
    fn test_admin_cannot_modify_admin_targets() {
        let result = validate_role_change(StaffRole::Admin, StaffRole::Admin, StaffRole::Librarian);
        assert!(result.is_err());
    }

    #[test]
    fn test_admin_restricted_to_lower_roles() {
        assert!(
            validate_role_change(StaffRole::Admin, StaffRole::Unassigned, StaffRole::Admin)
                .is_err()
        );
        assert!(
            validate_role_change(StaffRole::Admin, StaffRole::Teacher, StaffRole::Librarian)
                .is_ok()
        );
    }

    #[test]
    fn test_super_admin_may_promote_to_admin() {
        assert!(
            validate_role_change(StaffRole::SuperAdmin, StaffRole::Teacher, StaffRole::Admin)
                .is_ok()
        );
    }

    #[test]
    fn test_non_admin_callers_rejected() {
        for caller in [StaffRole::Teacher, StaffRole::Librarian, StaffRole::Unassigned] {
            assert!(
                validate_role_change(caller, StaffRole::Unassigned, StaffRole::Librarian).is_err()
            );
        }
    }
}
