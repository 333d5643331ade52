use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::agencies::{dtos as agency_dtos, handlers as agency_handlers};
use crate::features::auth::{self, dtos as auth_dtos, handlers as auth_handlers};
use crate::features::categories::{dtos as category_dtos, handlers as category_handlers};
use crate::features::complaints::{
    dtos as complaint_dtos, handlers as complaint_handlers, models as complaint_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::reviews::{dtos as review_dtos, handlers as review_handlers};
use crate::features::users::{dtos as user_dtos, handlers as user_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::verify_otp,
        auth_handlers::resend_otp,
        auth_handlers::forgot_password,
        auth_handlers::reset_password,
        auth_handlers::get_me,
        // Complaints (public form lookups)
        complaint_handlers::list_form_categories,
        complaint_handlers::list_form_agencies,
        // Complaints
        complaint_handlers::create_complaint,
        complaint_handlers::list_my_complaints,
        complaint_handlers::list_all_complaints,
        complaint_handlers::list_agency_complaints,
        complaint_handlers::get_complaint,
        complaint_handlers::update_complaint,
        complaint_handlers::delete_complaint,
        complaint_handlers::respond_to_complaint,
        // Categories (admin)
        category_handlers::list_categories,
        category_handlers::create_category,
        category_handlers::update_category,
        category_handlers::toggle_category,
        category_handlers::delete_category,
        // Agencies (admin)
        agency_handlers::list_agencies,
        agency_handlers::create_agency,
        agency_handlers::update_agency,
        agency_handlers::toggle_agency,
        agency_handlers::delete_agency,
        agency_handlers::list_staff,
        agency_handlers::assign_staff,
        agency_handlers::remove_staff,
        // Users (admin)
        user_handlers::list_users,
        user_handlers::change_user_role,
        user_handlers::verify_user,
        user_handlers::delete_user,
        // Dashboard
        dashboard_handlers::get_stats,
        // Reviews (public)
        review_handlers::create_review,
        review_handlers::list_reviews,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::Role,
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::VerifyOtpRequestDto,
            auth_dtos::ResendOtpRequestDto,
            auth_dtos::ForgotPasswordRequestDto,
            auth_dtos::ResetPasswordRequestDto,
            auth_dtos::UserResponseDto,
            auth_dtos::AuthResponseDto,
            ApiResponse<auth_dtos::UserResponseDto>,
            ApiResponse<auth_dtos::AuthResponseDto>,
            // Complaints
            complaint_models::ComplaintStatus,
            complaint_models::ComplaintPriority,
            complaint_dtos::CreateComplaintDto,
            complaint_dtos::UpdateComplaintDto,
            complaint_dtos::RespondComplaintDto,
            complaint_dtos::ComplaintResponseDto,
            complaint_dtos::ResponseItemDto,
            complaint_dtos::ComplaintDetailDto,
            ApiResponse<complaint_dtos::ComplaintResponseDto>,
            ApiResponse<Vec<complaint_dtos::ComplaintResponseDto>>,
            ApiResponse<complaint_dtos::ComplaintDetailDto>,
            // Categories
            category_dtos::CreateCategoryDto,
            category_dtos::UpdateCategoryDto,
            category_dtos::CategoryResponseDto,
            ApiResponse<category_dtos::CategoryResponseDto>,
            ApiResponse<Vec<category_dtos::CategoryResponseDto>>,
            // Agencies
            agency_dtos::CreateAgencyDto,
            agency_dtos::UpdateAgencyDto,
            agency_dtos::AssignStaffDto,
            agency_dtos::AgencyResponseDto,
            ApiResponse<agency_dtos::AgencyResponseDto>,
            ApiResponse<Vec<agency_dtos::AgencyResponseDto>>,
            // Users
            user_dtos::UpdateUserRoleDto,
            ApiResponse<Vec<auth_dtos::UserResponseDto>>,
            // Dashboard
            dashboard_dtos::DashboardStatsDto,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
            // Reviews
            review_dtos::CreateReviewDto,
            review_dtos::ReviewResponseDto,
            ApiResponse<review_dtos::ReviewResponseDto>,
            ApiResponse<Vec<review_dtos::ReviewResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login, email verification, password reset"),
        (name = "complaints", description = "Complaint submission, tracking, and responses"),
        (name = "categories", description = "Complaint category management (admin)"),
        (name = "agencies", description = "Agency management and staff assignment (admin)"),
        (name = "users", description = "User administration (admin)"),
        (name = "dashboard", description = "Role-scoped complaint statistics"),
        (name = "reviews", description = "Public service reviews"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicDesk API",
        version = "0.1.0",
        description = "API documentation for CivicDesk",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
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

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
