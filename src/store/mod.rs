//! Persistence layer for accounts, the course catalog, and purchases.
//!
//! All handlers talk to the [`Store`] trait so the backend can be swapped:
//! [`PgStore`] persists to PostgreSQL, [`MemoryStore`] keeps everything in
//! process memory for local runs and tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::accounts::model::{NewPrincipal, Principal, Role};
use crate::modules::courses::model::{Course, NewCourse};
use crate::modules::enrollments::model::Enrollment;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness rule was violated (duplicate username or repeat purchase).
    #[error("{0}")]
    Duplicate(String),

    /// The backing store failed.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Backend(anyhow::Error::from(e))
    }
}

/// Abstract trait for the account, catalog, and purchase store.
///
/// Uniqueness checks are the store's job: [`Store::insert_principal`] and
/// [`Store::add_enrollment`] must decide duplicates atomically, so two racing
/// signups or purchases for the same key admit exactly one winner.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new account under `role`. Fails with [`StoreError::Duplicate`]
    /// if the username is already taken within that role.
    async fn insert_principal(
        &self,
        role: Role,
        new: NewPrincipal,
    ) -> Result<Principal, StoreError>;

    async fn find_principal_by_username(
        &self,
        role: Role,
        username: &str,
    ) -> Result<Option<Principal>, StoreError>;

    async fn find_principal_by_id(
        &self,
        role: Role,
        id: Uuid,
    ) -> Result<Option<Principal>, StoreError>;

    /// Overwrite the stored refresh token for an account.
    async fn set_refresh_token(
        &self,
        role: Role,
        id: Uuid,
        refresh_token: &str,
    ) -> Result<(), StoreError>;

    async fn insert_course(&self, new: NewCourse) -> Result<Course, StoreError>;

    /// All courses in catalog order (oldest first).
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError>;

    async fn find_course_by_id(&self, id: Uuid) -> Result<Option<Course>, StoreError>;

    /// Case-insensitive substring match on course titles.
    async fn search_courses_by_title(&self, title: &str) -> Result<Vec<Course>, StoreError>;

    /// Record a purchase. Fails with [`StoreError::Duplicate`] if the user
    /// already owns the course.
    async fn add_enrollment(&self, user_id: Uuid, course_id: Uuid)
    -> Result<Enrollment, StoreError>;

    async fn list_enrollments(&self, user_id: Uuid) -> Result<Vec<Enrollment>, StoreError>;

    /// Mark a purchased course as completed with full progress. Returns
    /// `None` if the user never purchased the course.
    async fn complete_enrollment(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, StoreError>;
}
