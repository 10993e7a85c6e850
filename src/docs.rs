use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middleware::auth::ACCESS_TOKEN_COOKIE;
use crate::modules::accounts::model::{
    AdminLoginData, AdminProfile, CredentialsDto, UserLoginData, UserProfile,
};
use crate::modules::courses::model::{Course, CourseStatus, StudentRef, SyllabusItem};
use crate::modules::enrollments::model::{
    CompleteCourseDto, EnrolledCourse, Enrollment, EnrollmentStatus, PurchasedCoursesData,
};
use crate::utils::response::{ApiResponse, ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::accounts::controller::user_signup,
        crate::modules::accounts::controller::user_signin,
        crate::modules::accounts::controller::admin_signup,
        crate::modules::accounts::controller::admin_signin,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::admin_courses,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::course_details,
        crate::modules::courses::controller::search_courses,
        crate::modules::enrollments::controller::purchased_courses,
        crate::modules::enrollments::controller::purchase_course,
        crate::modules::enrollments::controller::my_courses,
        crate::modules::enrollments::controller::complete_course,
    ),
    components(
        schemas(
            CredentialsDto,
            UserProfile,
            AdminProfile,
            UserLoginData,
            AdminLoginData,
            Course,
            CourseStatus,
            SyllabusItem,
            StudentRef,
            Enrollment,
            EnrollmentStatus,
            EnrolledCourse,
            PurchasedCoursesData,
            CompleteCourseDto,
            MessageResponse,
            ErrorResponse,
            ApiResponse<UserLoginData>,
            ApiResponse<AdminLoginData>,
            ApiResponse<Course>,
            ApiResponse<Vec<Course>>,
            ApiResponse<PurchasedCoursesData>,
            ApiResponse<Vec<EnrolledCourse>>,
            ApiResponse<Enrollment>,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "User and admin registration and sign-in"),
        (name = "Courses", description = "Course catalog browsing, search, and creation"),
        (name = "Enrollments", description = "Course purchases and progress tracking")
    ),
    info(
        title = "Coursebay API",
        version = "0.1.0",
        description = "A course marketplace REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        contact(
            name = "Coursebay Support",
            email = "support@coursebay.dev"
        ),
        license(
            name = "MIT"
        )
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
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_TOKEN_COOKIE))),
            );
        }
    }
}
