use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{admin_courses, course_details, create_course, list_courses, search_courses};

/// Catalog routes nested under `/users`.
pub fn init_user_courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/{course_id}", post(course_details))
        .route("/search-courses", get(search_courses))
}

/// Catalog routes nested under `/admin`. Course creation carries a cover
/// image, so the body limit is raised beyond axum's 2MB default.
pub fn init_admin_courses_router() -> Router<AppState> {
    Router::new().route(
        "/courses",
        post(create_course)
            .get(admin_courses)
            .layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
    )
}
