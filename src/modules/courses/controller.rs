use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{AuthAdmin, AuthUser};
use crate::state::AppState;
use crate::utils::errors::ApiError;
use crate::utils::response::{ApiResponse, ErrorResponse};

use super::model::{Course, CreateCourseForm, ImageUpload, SearchQuery};
use super::service::CourseService;

/// Accumulate the multipart fields into a [`CreateCourseForm`]. Unknown
/// field names are ignored, matching what the SPA submits.
async fn read_course_form(mut multipart: Multipart) -> Result<CreateCourseForm, ApiError> {
    let invalid = || ApiError::InvalidInput("Invalid multipart form data".to_string());

    let mut form = CreateCourseForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|_| invalid())? {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        if name == "imageLink" {
            let file_name = field.file_name().unwrap_or("upload.bin").to_string();
            let bytes = field.bytes().await.map_err(|_| invalid())?;
            form.image = Some(ImageUpload {
                file_name,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let text = field.text().await.map_err(|_| invalid())?;
        match name.as_str() {
            "title" => form.title = Some(text),
            "description" => form.description = Some(text),
            "price" => form.price = Some(text),
            "instructor" => form.instructor = Some(text),
            "enrollmentStatus" => form.enrollment_status = Some(text),
            "duration" => form.duration = Some(text),
            "schedule" => form.schedule = Some(text),
            "location" => form.location = Some(text),
            "prerequisites" => form.prerequisites.push(text),
            "syllabus" => form.syllabus = Some(text),
            _ => {}
        }
    }

    Ok(form)
}

/// Create a course from a multipart form (admin only)
#[utoipa::path(
    post,
    path = "/admin/courses",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Course created successfully, data is the new course id", body = ApiResponse<Uuid>),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Image upload failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state, multipart))]
pub async fn create_course(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    let form = read_course_form(multipart).await?;
    let course =
        CourseService::create_course(&state.store, &state.assets, form, admin.id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        course.id,
        "Course created successfully",
    )))
}

/// List all courses (admin view)
#[utoipa::path(
    get,
    path = "/admin/courses",
    responses(
        (status = 200, description = "All courses", body = ApiResponse<Vec<Course>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn admin_courses(
    State(state): State<AppState>,
    AuthAdmin(_admin): AuthAdmin,
) -> Result<Json<ApiResponse<Vec<Course>>>, ApiError> {
    let courses = CourseService::list_courses(&state.store).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK, courses, "Success")))
}

/// Browse the catalog (signed-in users)
#[utoipa::path(
    get,
    path = "/users/courses",
    responses(
        (status = 200, description = "All courses", body = ApiResponse<Vec<Course>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Course>>>, ApiError> {
    let courses = CourseService::list_courses(&state.store).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK, courses, "Success")))
}

/// Fetch one course by id
#[utoipa::path(
    post,
    path = "/users/courses/{course_id}",
    params(
        ("course_id" = String, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Course details fetched successfully", body = ApiResponse<Course>),
        (status = 400, description = "Invalid course ID format", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn course_details(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    let course = CourseService::get_course(&state.store, &course_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        course,
        "Course details fetched successfully",
    )))
}

/// Search the catalog by title substring
#[utoipa::path(
    get,
    path = "/users/search-courses",
    params(
        SearchQuery
    ),
    responses(
        (status = 200, description = "Courses fetched successfully", body = ApiResponse<Vec<Course>>),
        (status = 404, description = "No courses found matching the criteria", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn search_courses(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Course>>>, ApiError> {
    let courses = CourseService::search_courses(&state.store, query.title).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        courses,
        "Courses fetched successfully",
    )))
}
