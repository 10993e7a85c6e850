use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::modules::accounts::model::{NewPrincipal, Principal, Role};
use crate::modules::courses::model::{Course, CourseStatus, NewCourse, StudentRef, SyllabusItem};
use crate::modules::enrollments::model::{Enrollment, EnrollmentStatus};

use super::{Store, StoreError};

/// PostgreSQL-backed store.
///
/// Duplicate detection leans on the database: the unique index on
/// `(role, username)` and the `(user_id, course_id)` primary key decide
/// races, not application-level checks.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database and run pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self { pool })
    }
}

#[derive(FromRow)]
struct PrincipalRow {
    id: Uuid,
    username: String,
    password_hash: String,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PrincipalRow> for Principal {
    fn from(row: PrincipalRow) -> Self {
        Principal {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: String,
    price: f64,
    instructor: String,
    image_link: String,
    enrollment_status: String,
    duration: String,
    schedule: String,
    location: String,
    prerequisites: Json<Vec<String>>,
    syllabus: Json<Vec<SyllabusItem>>,
    students: Json<Vec<StudentRef>>,
    owner: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            instructor: row.instructor,
            image_link: row.image_link,
            // The CHECK constraint keeps this parseable
            enrollment_status: CourseStatus::parse(&row.enrollment_status)
                .unwrap_or(CourseStatus::Open),
            duration: row.duration,
            schedule: row.schedule,
            location: row.location,
            prerequisites: row.prerequisites.0,
            syllabus: row.syllabus.0,
            students: row.students.0,
            owner: row.owner,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct EnrollmentRow {
    course_id: Uuid,
    status: String,
    progress: i32,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            course_id: row.course_id,
            status: if row.status == "completed" {
                EnrollmentStatus::Completed
            } else {
                EnrollmentStatus::InProgress
            },
            progress: row.progress,
        }
    }
}

const COURSE_COLUMNS: &str = "id, title, description, price, instructor, image_link, \
     enrollment_status, duration, schedule, location, prerequisites, syllabus, \
     students, owner, created_at, updated_at";

#[async_trait]
impl Store for PgStore {
    async fn insert_principal(
        &self,
        role: Role,
        new: NewPrincipal,
    ) -> Result<Principal, StoreError> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            INSERT INTO principals (id, role, username, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, refresh_token, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(role.as_str())
        .bind(&new.username)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::Duplicate(format!(
                        "{} username already taken",
                        role.as_str()
                    ));
                }
            }
            StoreError::from(e)
        })?;

        Ok(row.into())
    }

    async fn find_principal_by_username(
        &self,
        role: Role,
        username: &str,
    ) -> Result<Option<Principal>, StoreError> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id, username, password_hash, refresh_token, created_at, updated_at
            FROM principals
            WHERE role = $1 AND username = $2
            "#,
        )
        .bind(role.as_str())
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_principal_by_id(
        &self,
        role: Role,
        id: Uuid,
    ) -> Result<Option<Principal>, StoreError> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id, username, password_hash, refresh_token, created_at, updated_at
            FROM principals
            WHERE role = $1 AND id = $2
            "#,
        )
        .bind(role.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn set_refresh_token(
        &self,
        role: Role,
        id: Uuid,
        refresh_token: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE principals
            SET refresh_token = $3, updated_at = NOW()
            WHERE role = $1 AND id = $2
            "#,
        )
        .bind(role.as_str())
        .bind(id)
        .bind(refresh_token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_course(&self, new: NewCourse) -> Result<Course, StoreError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            INSERT INTO courses (
                id, title, description, price, instructor, image_link,
                enrollment_status, duration, schedule, location,
                prerequisites, syllabus, students, owner
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {COURSE_COLUMNS}
            "#,
        ))
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.instructor)
        .bind(&new.image_link)
        .bind(new.enrollment_status.as_str())
        .bind(&new.duration)
        .bind(&new.schedule)
        .bind(&new.location)
        .bind(Json(&new.prerequisites))
        .bind(Json(&new.syllabus))
        .bind(Json(Vec::<StudentRef>::new()))
        .bind(new.owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_course_by_id(&self, id: Uuid) -> Result<Option<Course>, StoreError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn search_courses_by_title(&self, title: &str) -> Result<Vec<Course>, StoreError> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses
            WHERE title ILIKE '%' || $1 || '%'
            ORDER BY created_at, id
            "#,
        ))
        .bind(title)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn add_enrollment(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, StoreError> {
        // ON CONFLICT DO NOTHING makes the duplicate check atomic: of two
        // racing purchases exactly one row comes back.
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            INSERT INTO enrollments (user_id, course_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, course_id) DO NOTHING
            RETURNING course_id, status, progress
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::Duplicate("course already purchased".to_string()))?;

        Ok(row.into())
    }

    async fn list_enrollments(&self, user_id: Uuid) -> Result<Vec<Enrollment>, StoreError> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT course_id, status, progress
            FROM enrollments
            WHERE user_id = $1
            ORDER BY created_at, course_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn complete_enrollment(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, StoreError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            UPDATE enrollments
            SET status = 'completed', progress = 100, updated_at = NOW()
            WHERE user_id = $1 AND course_id = $2
            RETURNING course_id, status, progress
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
