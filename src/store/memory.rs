use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::accounts::model::{NewPrincipal, Principal, Role};
use crate::modules::courses::model::{Course, NewCourse};
use crate::modules::enrollments::model::{Enrollment, EnrollmentStatus};

use super::{Store, StoreError};

/// In-memory store backed by a single `RwLock`.
///
/// Used when `DATABASE_URL` is not configured, and by the integration tests.
/// Courses keep insertion order so listings match the catalog order of the
/// PostgreSQL store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, Principal>,
    admins: HashMap<Uuid, Principal>,
    courses: Vec<Course>,
    enrollments: HashMap<Uuid, Vec<Enrollment>>,
}

impl Inner {
    fn principals(&self, role: Role) -> &HashMap<Uuid, Principal> {
        match role {
            Role::User => &self.users,
            Role::Admin => &self.admins,
        }
    }

    fn principals_mut(&mut self, role: Role) -> &mut HashMap<Uuid, Principal> {
        match role {
            Role::User => &mut self.users,
            Role::Admin => &mut self.admins,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_principal(
        &self,
        role: Role,
        new: NewPrincipal,
    ) -> Result<Principal, StoreError> {
        let mut inner = self.inner.write().await;

        if inner
            .principals(role)
            .values()
            .any(|p| p.username == new.username)
        {
            return Err(StoreError::Duplicate(format!(
                "{} username already taken",
                role.as_str()
            )));
        }

        let now = Utc::now();
        let principal = Principal {
            id: Uuid::new_v4(),
            username: new.username,
            password_hash: new.password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        inner
            .principals_mut(role)
            .insert(principal.id, principal.clone());

        Ok(principal)
    }

    async fn find_principal_by_username(
        &self,
        role: Role,
        username: &str,
    ) -> Result<Option<Principal>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .principals(role)
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn find_principal_by_id(
        &self,
        role: Role,
        id: Uuid,
    ) -> Result<Option<Principal>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.principals(role).get(&id).cloned())
    }

    async fn set_refresh_token(
        &self,
        role: Role,
        id: Uuid,
        refresh_token: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(principal) = inner.principals_mut(role).get_mut(&id) {
            principal.refresh_token = Some(refresh_token.to_string());
            principal.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn insert_course(&self, new: NewCourse) -> Result<Course, StoreError> {
        let mut inner = self.inner.write().await;

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            price: new.price,
            instructor: new.instructor,
            image_link: new.image_link,
            enrollment_status: new.enrollment_status,
            duration: new.duration,
            schedule: new.schedule,
            location: new.location,
            prerequisites: new.prerequisites,
            syllabus: new.syllabus,
            students: Vec::new(),
            owner: new.owner,
            created_at: now,
            updated_at: now,
        };

        inner.courses.push(course.clone());

        Ok(course)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.courses.clone())
    }

    async fn find_course_by_id(&self, id: Uuid) -> Result<Option<Course>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn search_courses_by_title(&self, title: &str) -> Result<Vec<Course>, StoreError> {
        let needle = title.to_lowercase();
        let inner = self.inner.read().await;
        Ok(inner
            .courses
            .iter()
            .filter(|c| c.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn add_enrollment(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, StoreError> {
        let mut inner = self.inner.write().await;
        let entries = inner.enrollments.entry(user_id).or_default();

        if entries.iter().any(|e| e.course_id == course_id) {
            return Err(StoreError::Duplicate(
                "course already purchased".to_string(),
            ));
        }

        let enrollment = Enrollment {
            course_id,
            status: EnrollmentStatus::InProgress,
            progress: 0,
        };
        entries.push(enrollment.clone());

        Ok(enrollment)
    }

    async fn list_enrollments(&self, user_id: Uuid) -> Result<Vec<Enrollment>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.enrollments.get(&user_id).cloned().unwrap_or_default())
    }

    async fn complete_enrollment(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, StoreError> {
        let mut inner = self.inner.write().await;

        let Some(entries) = inner.enrollments.get_mut(&user_id) else {
            return Ok(None);
        };
        let Some(enrollment) = entries.iter_mut().find(|e| e.course_id == course_id) else {
            return Ok(None);
        };

        enrollment.status = EnrollmentStatus::Completed;
        enrollment.progress = 100;

        Ok(Some(enrollment.clone()))
    }
}
