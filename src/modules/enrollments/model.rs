use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::accounts::model::UserProfile;
use crate::modules::courses::model::Course;

/// Progress state of a purchased course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EnrollmentStatus {
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::InProgress => "in-progress",
            EnrollmentStatus::Completed => "completed",
        }
    }
}

/// One purchased course on a user's record. New purchases start in-progress
/// with zero progress.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    pub progress: i32,
}

/// A purchase joined with its full course record, for the progress listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnrolledCourse {
    pub course: Course,
    pub status: EnrollmentStatus,
    pub progress: i32,
}

/// Envelope data of GET /users/purchasedCourses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchasedCoursesData {
    pub user: UserProfile,
}

// Body of POST /courses/complete
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCourseDto {
    #[validate(length(min = 1, message = "courseId is required"))]
    pub course_id: String,
}
