use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::modules::accounts::model::{Role, UserProfile};
use crate::modules::courses::model::Course;
use crate::store::{Store, StoreError};
use crate::utils::errors::ApiError;

use super::model::{CompleteCourseDto, EnrolledCourse, Enrollment};

pub struct EnrollmentService;

impl EnrollmentService {
    /// Record a purchase and return the course bought. The store decides
    /// duplicates atomically, so racing purchases admit one winner.
    #[instrument(skip(store))]
    pub async fn purchase(
        store: &Arc<dyn Store>,
        user_id: Uuid,
        raw_course_id: &str,
    ) -> Result<Course, ApiError> {
        let course_id = Uuid::parse_str(raw_course_id)
            .map_err(|_| ApiError::InvalidInput("Invalid course ID format".to_string()))?;

        let course = store
            .find_course_by_id(course_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

        store
            .add_enrollment(user_id, course_id)
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => {
                    ApiError::Conflict("Course already purchased".to_string())
                }
                other => other.into(),
            })?;

        Ok(course)
    }

    /// The signed-in user's profile with purchases inline.
    #[instrument(skip(store))]
    pub async fn purchased_profile(
        store: &Arc<dyn Store>,
        user_id: Uuid,
    ) -> Result<UserProfile, ApiError> {
        let principal = store
            .find_principal_by_id(Role::User, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let enrollments = store.list_enrollments(user_id).await?;

        Ok(UserProfile::from_parts(principal, enrollments))
    }

    /// Purchases joined with their full course records. An enrollment whose
    /// course no longer resolves is skipped rather than failing the listing.
    #[instrument(skip(store))]
    pub async fn my_courses(
        store: &Arc<dyn Store>,
        user_id: Uuid,
    ) -> Result<Vec<EnrolledCourse>, ApiError> {
        let enrollments = store.list_enrollments(user_id).await?;

        let mut courses = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            if let Some(course) = store.find_course_by_id(enrollment.course_id).await? {
                courses.push(EnrolledCourse {
                    course,
                    status: enrollment.status,
                    progress: enrollment.progress,
                });
            }
        }

        Ok(courses)
    }

    /// Mark a purchased course as completed with full progress.
    #[instrument(skip(store, dto))]
    pub async fn complete(
        store: &Arc<dyn Store>,
        user_id: Uuid,
        dto: CompleteCourseDto,
    ) -> Result<Enrollment, ApiError> {
        let course_id = Uuid::parse_str(dto.course_id.trim())
            .map_err(|_| ApiError::InvalidInput("Invalid course ID format".to_string()))?;

        store
            .complete_enrollment(user_id, course_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Course not purchased".to_string()))
    }
}
