use std::path::Path;
use std::sync::Arc;

use tracing::{instrument, warn};
use uuid::Uuid;

use crate::assets::AssetStore;
use crate::store::Store;
use crate::utils::errors::ApiError;

use super::model::{Course, CourseStatus, CreateCourseForm, NewCourse, SyllabusItem};

pub struct CourseService;

impl CourseService {
    fn required_text(value: Option<String>) -> Result<String, ApiError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ApiError::InvalidInput(
                "All required fields must be filled out".to_string(),
            )),
        }
    }

    /// Syllabus arrives as one JSON-encoded form field. It must be a
    /// non-empty JSON array of `{week, topic, content}` items with weeks
    /// numbered from 1.
    fn parse_syllabus(raw: Option<String>) -> Result<Vec<SyllabusItem>, ApiError> {
        let raw = match raw {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                return Err(ApiError::InvalidInput(
                    "Invalid syllabus format: Syllabus should be a non-empty JSON string"
                        .to_string(),
                ));
            }
        };

        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| ApiError::InvalidInput(format!("Invalid syllabus format: {}", e)))?;

        let entries = value.as_array().ok_or_else(|| {
            ApiError::InvalidInput(
                "Invalid syllabus format: Syllabus should be an array".to_string(),
            )
        })?;

        entries
            .iter()
            .map(|entry| {
                let item: SyllabusItem =
                    serde_json::from_value(entry.clone()).map_err(|_| item_error())?;
                if item.week < 1 {
                    return Err(item_error());
                }
                Ok(item)
            })
            .collect()
    }

    /// Prerequisites come either as repeated form fields or as one field
    /// holding a JSON-encoded array (how the SPA submits them).
    fn parse_prerequisites(raw: Vec<String>) -> Vec<String> {
        if let [single] = raw.as_slice() {
            if single.trim_start().starts_with('[') {
                if let Ok(parsed) = serde_json::from_str::<Vec<String>>(single) {
                    return parsed;
                }
            }
        }
        raw
    }

    /// Validate the multipart form, store the cover image, and insert the
    /// course under the signed-in admin.
    #[instrument(skip(store, assets, form))]
    pub async fn create_course(
        store: &Arc<dyn Store>,
        assets: &Arc<dyn AssetStore>,
        form: CreateCourseForm,
        owner: Uuid,
    ) -> Result<Course, ApiError> {
        let title = Self::required_text(form.title)?;
        let description = Self::required_text(form.description)?;
        let price_raw = Self::required_text(form.price)?;
        let instructor = Self::required_text(form.instructor)?;
        let status_raw = Self::required_text(form.enrollment_status)?;
        let duration = Self::required_text(form.duration)?;
        let schedule = Self::required_text(form.schedule)?;
        let location = Self::required_text(form.location)?;

        let price: f64 = price_raw
            .trim()
            .parse()
            .ok()
            .filter(|p: &f64| *p >= 0.0)
            .ok_or_else(|| {
                ApiError::InvalidInput("Price must be a non-negative number".to_string())
            })?;

        let enrollment_status = CourseStatus::parse(status_raw.trim()).ok_or_else(|| {
            ApiError::InvalidInput(
                "Enrollment status must be one of Open, Closed, In Progress".to_string(),
            )
        })?;

        let syllabus = Self::parse_syllabus(form.syllabus)?;
        let prerequisites = Self::parse_prerequisites(form.prerequisites);

        let image = form
            .image
            .ok_or_else(|| ApiError::InvalidInput("Image file is required".to_string()))?;

        let extension = Path::new(&image.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        let key = format!("courses/{}.{}", Uuid::new_v4(), extension);

        let image_link = match assets.save(&key, &image.bytes).await {
            Ok(key) => assets.url(&key),
            Err(e) => Err(e),
        }
        .map_err(|e| {
            warn!(error = %e, "Cover image upload failed");
            ApiError::Upload(format!("Image upload error: {}", e))
        })?;

        let course = store
            .insert_course(NewCourse {
                title,
                description,
                price,
                image_link,
                instructor,
                enrollment_status,
                duration,
                schedule,
                location,
                prerequisites,
                syllabus,
                owner,
            })
            .await?;

        Ok(course)
    }

    #[instrument(skip(store))]
    pub async fn list_courses(store: &Arc<dyn Store>) -> Result<Vec<Course>, ApiError> {
        Ok(store.list_courses().await?)
    }

    /// Look a course up by its raw path parameter.
    #[instrument(skip(store))]
    pub async fn get_course(store: &Arc<dyn Store>, raw_id: &str) -> Result<Course, ApiError> {
        let id = Uuid::parse_str(raw_id)
            .map_err(|_| ApiError::InvalidInput("Invalid course ID format".to_string()))?;

        store
            .find_course_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))
    }

    /// Case-insensitive title search. A missing or empty term matches the
    /// whole catalog; an empty result set is a 404.
    #[instrument(skip(store))]
    pub async fn search_courses(
        store: &Arc<dyn Store>,
        title: Option<String>,
    ) -> Result<Vec<Course>, ApiError> {
        let needle = title.unwrap_or_default();
        let courses = store.search_courses_by_title(&needle).await?;

        if courses.is_empty() {
            return Err(ApiError::NotFound(
                "No courses found matching the criteria".to_string(),
            ));
        }

        Ok(courses)
    }
}

fn item_error() -> ApiError {
    ApiError::InvalidInput(
        "Invalid syllabus format: Each syllabus item must have week (number), topic (string), and content (string)"
            .to_string(),
    )
}
