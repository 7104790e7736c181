use shulebase::middleware::role::{
    is_subject_manager, is_teaching_staff, is_timetable_manager, require_any_role,
    require_subject_manager, validate_role_change,
};
use shulebase::modules::auth::model::Principal;
use shulebase::modules::users::model::StaffRole;
use uuid::Uuid;

fn principal(role: StaffRole, subroles: &[&str]) -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        external_subject_id: Some("ext_test".to_string()),
        email: "staff@school.test".to_string(),
        full_name: "Test Staff".to_string(),
        role,
        subroles: subroles.iter().map(|s| s.to_string()).collect(),
        assigned_class_id: None,
        assigned_stream_id: None,
    }
}

#[test]
fn test_super_admin_role_is_never_mutable() {
    // Neither a SUPER_ADMIN nor an admin caller may touch a SUPER_ADMIN
    // target, whatever the requested role.
    for caller in [StaffRole::SuperAdmin, StaffRole::Admin] {
        for requested in [
            StaffRole::Admin,
            StaffRole::Teacher,
            StaffRole::Librarian,
            StaffRole::Unassigned,
        ] {
            assert!(
                validate_role_change(caller, StaffRole::SuperAdmin, requested).is_err(),
                "caller {caller} must not change SUPER_ADMIN to {requested}"
            );
        }
    }
}

#[test]
fn test_super_admin_cannot_be_granted() {
    for current in [StaffRole::Admin, StaffRole::Teacher, StaffRole::Unassigned] {
        assert!(
            validate_role_change(StaffRole::SuperAdmin, current, StaffRole::SuperAdmin).is_err()
        );
    }
}

#[test]
fn test_admin_cannot_modify_another_admin() {
    let result = validate_role_change(StaffRole::Admin, StaffRole::Admin, StaffRole::Librarian);
    assert!(result.is_err());
}

#[test]
fn test_admin_assignment_subset() {
    for requested in [StaffRole::Librarian, StaffRole::Teacher, StaffRole::Unassigned] {
        assert!(
            validate_role_change(StaffRole::Admin, StaffRole::Unassigned, requested).is_ok(),
            "admin should be able to assign {requested}"
        );
    }
    assert!(
        validate_role_change(StaffRole::Admin, StaffRole::Unassigned, StaffRole::Admin).is_err()
    );
}

#[test]
fn test_only_super_admin_promotes_to_admin() {
    assert!(
        validate_role_change(StaffRole::SuperAdmin, StaffRole::Teacher, StaffRole::Admin).is_ok()
    );
    assert!(
        validate_role_change(StaffRole::Admin, StaffRole::Teacher, StaffRole::Admin).is_err()
    );
}

#[test]
fn test_transitions_between_lower_roles_are_open_to_super_admin() {
    for current in [StaffRole::Librarian, StaffRole::Teacher, StaffRole::Unassigned] {
        for requested in [StaffRole::Librarian, StaffRole::Teacher, StaffRole::Unassigned] {
            assert!(
                validate_role_change(StaffRole::SuperAdmin, current, requested).is_ok(),
                "SUPER_ADMIN should move {current} to {requested}"
            );
        }
    }
}

#[test]
fn test_unprivileged_callers_always_rejected() {
    for caller in [StaffRole::Teacher, StaffRole::Librarian, StaffRole::Unassigned] {
        assert!(
            validate_role_change(caller, StaffRole::Unassigned, StaffRole::Unassigned).is_err()
        );
    }
}

#[test]
fn test_require_any_role_matches_on_membership() {
    let librarian = principal(StaffRole::Librarian, &[]);
    assert!(
        require_any_role(
            &librarian,
            &[StaffRole::Librarian, StaffRole::Admin, StaffRole::SuperAdmin]
        )
        .is_ok()
    );
    assert!(require_any_role(&librarian, &[StaffRole::SuperAdmin]).is_err());
}

#[test]
fn test_subject_manager_requires_admin_with_subrole() {
    assert!(require_subject_manager(&principal(StaffRole::SuperAdmin, &[])).is_ok());
    assert!(require_subject_manager(&principal(StaffRole::Admin, &["all"])).is_ok());
    assert!(
        require_subject_manager(&principal(StaffRole::Admin, &["timetable_manager"])).is_ok()
    );
    assert!(require_subject_manager(&principal(StaffRole::Admin, &["finance"])).is_err());
    assert!(require_subject_manager(&principal(StaffRole::Teacher, &["all"])).is_err());
}

#[test]
fn test_subject_manager_vs_timetable_manager_tags() {
    let legacy = principal(StaffRole::Admin, &["timetabling"]);
    assert!(!is_subject_manager(&legacy));
    assert!(is_timetable_manager(&legacy));
}

#[test]
fn test_teaching_staff_tier() {
    assert!(is_teaching_staff(&principal(StaffRole::Teacher, &[])));
    assert!(is_teaching_staff(&principal(StaffRole::Admin, &["teacher"])));
    assert!(!is_teaching_staff(&principal(StaffRole::Librarian, &[])));
    assert!(!is_teaching_staff(&principal(StaffRole::Admin, &["finance"])));
}
