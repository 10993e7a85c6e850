use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{complete_course, my_courses, purchase_course, purchased_courses};

/// Purchase routes nested under `/users`.
pub fn init_user_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/purchasedCourses", get(purchased_courses))
        .route("/purchase/{course_id}", post(purchase_course))
        .route("/mycourses", get(my_courses))
}

/// Progress routes mounted at the root, where the SPA calls them.
pub fn init_progress_router() -> Router<AppState> {
    Router::new().route("/courses/complete", post(complete_course))
}
