use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::Principal;
use crate::modules::books::model::{Book, BookResponse, CreateBookDto, UpdateBookDto};
use crate::modules::circulation::model::{
    BorrowRecord, BorrowRequestDto, BorrowStatus, HistoryItem,
};
use crate::modules::classes::model::{Class, ClassOverview, CreateClassDto, StreamSummary};
use crate::modules::config::model::{ConfigUpdateDto, GlobalConfig, PolicyCheckResponse};
use crate::modules::logs::model::{LogLevel, LogStats, LogsResponse, SystemLog};
use crate::modules::streams::model::{CreateStreamDto, Stream, StreamDetail};
use crate::modules::student_auth::model::{
    ActivateAccountDto, OnboardVerifyDto, OnboardVerifyResponse, PortalProfile, StudentLoginDto,
    TokenResponse,
};
use crate::modules::students::model::{
    CreateStudentDto, Student, StudentDetail, UpdateStudentDto,
};
use crate::modules::users::model::{
    StaffMember, StaffRole, UpdateRoleDto, UpdateSubrolesDto, User,
};
use crate::utils::pagination::Paginated;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::get_me,
        crate::modules::users::controller::get_staff,
        crate::modules::users::controller::update_user_role,
        crate::modules::users::controller::update_subroles,
        crate::modules::config::controller::get_config,
        crate::modules::config::controller::update_config,
        crate::modules::config::controller::check_policy,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::streams::controller::get_streams,
        crate::modules::streams::controller::create_stream,
        crate::modules::streams::controller::delete_stream,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::clear_student,
        crate::modules::students::controller::reset_student_account,
        crate::modules::student_auth::controller::verify_onboarding,
        crate::modules::student_auth::controller::activate_account,
        crate::modules::student_auth::controller::login,
        crate::modules::student_auth::controller::get_me,
        crate::modules::books::controller::get_books,
        crate::modules::books::controller::create_book,
        crate::modules::books::controller::update_book,
        crate::modules::books::controller::delete_book,
        crate::modules::circulation::controller::get_borrow_history,
        crate::modules::circulation::controller::borrow_book,
        crate::modules::circulation::controller::return_book,
        crate::modules::logs::controller::get_logs,
    ),
    components(
        schemas(
            ErrorResponse,
            Principal,
            User,
            StaffRole,
            StaffMember,
            UpdateRoleDto,
            UpdateSubrolesDto,
            GlobalConfig,
            ConfigUpdateDto,
            PolicyCheckResponse,
            Class,
            ClassOverview,
            StreamSummary,
            CreateClassDto,
            Stream,
            StreamDetail,
            CreateStreamDto,
            Student,
            StudentDetail,
            CreateStudentDto,
            UpdateStudentDto,
            OnboardVerifyDto,
            OnboardVerifyResponse,
            ActivateAccountDto,
            StudentLoginDto,
            TokenResponse,
            PortalProfile,
            Book,
            BookResponse,
            CreateBookDto,
            UpdateBookDto,
            BorrowRecord,
            BorrowRequestDto,
            BorrowStatus,
            HistoryItem,
            Paginated<BookResponse>,
            Paginated<StudentDetail>,
            Paginated<HistoryItem>,
            SystemLog,
            LogLevel,
            LogStats,
            LogsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Staff identity reconciliation"),
        (name = "Users", description = "Staff accounts and roles"),
        (name = "Configuration", description = "Global configuration"),
        (name = "Classes", description = "Class records"),
        (name = "Streams", description = "Stream records"),
        (name = "Students", description = "Student administration"),
        (name = "Student Portal", description = "Student self-service"),
        (name = "Books", description = "Library catalog"),
        (name = "Circulation", description = "Borrow and return"),
        (name = "Audit", description = "Audit log")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
