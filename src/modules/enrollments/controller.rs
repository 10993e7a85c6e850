use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::ApiError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{CompleteCourseDto, EnrolledCourse, Enrollment, PurchasedCoursesData};
use super::service::EnrollmentService;
use crate::modules::courses::model::Course;

/// The signed-in user's account with purchased courses inline
#[utoipa::path(
    get,
    path = "/users/purchasedCourses",
    responses(
        (status = 200, description = "User with enrollment list", body = ApiResponse<PurchasedCoursesData>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn purchased_courses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<PurchasedCoursesData>>, ApiError> {
    let profile = EnrollmentService::purchased_profile(&state.store, user.id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        PurchasedCoursesData { user: profile },
        "Success",
    )))
}

/// Purchase a course
#[utoipa::path(
    post,
    path = "/users/purchase/{course_id}",
    params(
        ("course_id" = String, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Course purchased successfully", body = ApiResponse<Course>),
        (status = 400, description = "Invalid course ID format", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Course already purchased", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn purchase_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(course_id): Path<String>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    let course = EnrollmentService::purchase(&state.store, user.id, &course_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        course,
        "Course purchased successfully",
    )))
}

/// Purchased courses joined with progress
#[utoipa::path(
    get,
    path = "/users/mycourses",
    responses(
        (status = 200, description = "Purchases with course details and progress", body = ApiResponse<Vec<EnrolledCourse>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn my_courses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<EnrolledCourse>>>, ApiError> {
    let courses = EnrollmentService::my_courses(&state.store, user.id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK, courses, "Success")))
}

/// Mark a purchased course as completed
#[utoipa::path(
    post,
    path = "/courses/complete",
    request_body = CompleteCourseDto,
    responses(
        (status = 200, description = "Course marked as completed", body = ApiResponse<Enrollment>),
        (status = 400, description = "Invalid course ID format", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not purchased", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn complete_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(dto): ValidatedJson<CompleteCourseDto>,
) -> Result<Json<ApiResponse<Enrollment>>, ApiError> {
    let enrollment = EnrollmentService::complete(&state.store, user.id, dto).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        enrollment,
        "Course marked as completed",
    )))
}
