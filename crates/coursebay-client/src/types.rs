//! Wire types mirroring the server's JSON surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The uniform envelope every endpoint returns. `data` is absent on
/// confirmation-only responses and on errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub data: Option<T>,
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    Open,
    Closed,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Open => "Open",
            CourseStatus::Closed => "Closed",
            CourseStatus::InProgress => "In Progress",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusItem {
    pub week: u32,
    pub topic: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_link: String,
    pub instructor: String,
    pub enrollment_status: CourseStatus,
    pub duration: String,
    pub schedule: String,
    pub location: String,
    pub prerequisites: Vec<String>,
    pub syllabus: Vec<SyllabusItem>,
    pub students: Vec<StudentRef>,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EnrollmentStatus {
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    pub progress: i32,
}

/// A purchase joined with its full course record.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrolledCourse {
    pub course: Course,
    pub status: EnrollmentStatus,
    pub progress: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub purchased_course: Vec<Enrollment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginData {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginData {
    pub access_token: String,
    pub refresh_token: String,
    pub admin: AdminProfile,
}

#[derive(Debug, Deserialize)]
pub struct PurchasedCoursesData {
    pub user: UserProfile,
}

/// Everything needed to create a course through the admin multipart route.
#[derive(Debug, Clone)]
pub struct NewCourseForm {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub instructor: String,
    pub enrollment_status: CourseStatus,
    pub duration: String,
    pub schedule: String,
    pub location: String,
    pub prerequisites: Vec<String>,
    pub syllabus: Vec<SyllabusItem>,
    pub image_file_name: String,
    pub image_bytes: Vec<u8>,
}
