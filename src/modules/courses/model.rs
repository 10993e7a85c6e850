use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Enrollment window of a course as the admin advertises it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
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

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Open" => Some(CourseStatus::Open),
            "Closed" => Some(CourseStatus::Closed),
            "In Progress" => Some(CourseStatus::InProgress),
            _ => None,
        }
    }
}

/// One week of course material. Weeks are numbered from 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SyllabusItem {
    pub week: u32,
    pub topic: String,
    pub content: String,
}

/// A user enrolled in a course. The creation flow never fills this in; the
/// list exists for catalog parity and always serializes empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Public URL of the stored cover image
    pub image_link: String,
    pub instructor: String,
    pub enrollment_status: CourseStatus,
    pub duration: String,
    pub schedule: String,
    pub location: String,
    pub prerequisites: Vec<String>,
    pub syllabus: Vec<SyllabusItem>,
    pub students: Vec<StudentRef>,
    /// Admin who created the course
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for [`crate::store::Store::insert_course`], fully
/// validated, with the cover image already stored.
#[derive(Debug, Clone)]
pub struct NewCourse {
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
    pub owner: Uuid,
}

/// An uploaded file pulled out of the multipart body.
#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Raw multipart fields as received. Everything stays optional until the
/// service validates the whole form at once.
#[derive(Debug, Default)]
pub struct CreateCourseForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub instructor: Option<String>,
    pub enrollment_status: Option<String>,
    pub duration: Option<String>,
    pub schedule: Option<String>,
    pub location: Option<String>,
    pub prerequisites: Vec<String>,
    pub syllabus: Option<String>,
    pub image: Option<ImageUpload>,
}

// Query string for GET /users/search-courses
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_status_round_trips_through_strings() {
        for status in [
            CourseStatus::Open,
            CourseStatus::Closed,
            CourseStatus::InProgress,
        ] {
            assert_eq!(CourseStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CourseStatus::parse("Enrolling"), None);
    }

    #[test]
    fn test_course_status_serializes_with_space() {
        let json = serde_json::to_string(&CourseStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let parsed: CourseStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, CourseStatus::InProgress);
    }

    #[test]
    fn test_course_serializes_camel_case() {
        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            title: "Rust Fundamentals".to_string(),
            description: "Start here".to_string(),
            price: 49.99,
            image_link: "http://localhost:8080/files/courses/a.png".to_string(),
            instructor: "Jane Doe".to_string(),
            enrollment_status: CourseStatus::Open,
            duration: "6 weeks".to_string(),
            schedule: "Mon/Wed".to_string(),
            location: "Online".to_string(),
            prerequisites: vec![],
            syllabus: vec![],
            students: vec![],
            owner: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&course).unwrap();
        assert!(json.get("imageLink").is_some());
        assert!(json.get("enrollmentStatus").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("image_link").is_none());
    }
}
