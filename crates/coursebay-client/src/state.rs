//! Client-side state store.
//!
//! Mirrors the web frontend's store: an auth slice, a course-list slice,
//! and a my-courses slice, each updated by async actions that set a
//! `loading` flag while in flight and record the last failure. Reads are
//! cheap clones of the cached state; nothing here talks to the server except
//! the `fetch_*` / mutation methods.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{Course, EnrolledCourse, NewCourseForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    User,
    Admin,
}

/// The signed-in principal as the client remembers it.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub role: SessionRole,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Default)]
struct ClientState {
    session: Option<Session>,
    courses: Vec<Course>,
    course_details: HashMap<Uuid, Course>,
    my_courses: Vec<EnrolledCourse>,
    loading: bool,
    last_error: Option<String>,
}

pub struct CourseStore {
    client: ApiClient,
    state: RwLock<ClientState>,
}

impl CourseStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: RwLock::new(ClientState::default()),
        }
    }

    /// Run one server call with loading / last-error bookkeeping.
    async fn run<T>(
        &self,
        call: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.last_error = None;
        }

        let result = call.await;

        let mut state = self.state.write().await;
        state.loading = false;
        if let Err(e) = &result {
            state.last_error = Some(e.to_string());
        }

        result
    }

    // Auth slice

    pub async fn signup_user(&self, username: &str, password: &str) -> Result<(), ClientError> {
        self.run(self.client.user_signup(username, password)).await?;
        Ok(())
    }

    pub async fn signup_admin(&self, username: &str, password: &str) -> Result<(), ClientError> {
        self.run(self.client.admin_signup(username, password)).await?;
        Ok(())
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let data = self.run(self.client.user_signin(username, password)).await?;

        debug!(username = %data.user.username, "user signed in");
        self.state.write().await.session = Some(Session {
            username: data.user.username,
            role: SessionRole::User,
            access_token: data.access_token,
            refresh_token: data.refresh_token,
        });
        Ok(())
    }

    pub async fn login_admin(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let data = self.run(self.client.admin_signin(username, password)).await?;

        debug!(username = %data.admin.username, "admin signed in");
        self.state.write().await.session = Some(Session {
            username: data.admin.username,
            role: SessionRole::Admin,
            access_token: data.access_token,
            refresh_token: data.refresh_token,
        });
        Ok(())
    }

    /// Drop the session locally. The server keeps no session state to clear,
    /// so no request is made. The catalog cache survives; the user-specific
    /// slices do not.
    pub async fn logout(&self) {
        self.client.set_token(None).await;

        let mut state = self.state.write().await;
        state.session = None;
        state.my_courses.clear();
        debug!("session cleared");
    }

    // Courses slice

    pub async fn fetch_courses(&self) -> Result<(), ClientError> {
        let courses = self.run(self.client.courses()).await?;
        self.state.write().await.courses = courses;
        Ok(())
    }

    /// Search the catalog; matches replace the course-list slice, the way
    /// the frontend renders search results.
    pub async fn search(&self, title: &str) -> Result<(), ClientError> {
        let courses = self.run(self.client.search_courses(title)).await?;
        self.state.write().await.courses = courses;
        Ok(())
    }

    /// Fetch one course into the details cache.
    pub async fn fetch_course(&self, course_id: Uuid) -> Result<Course, ClientError> {
        let course = self.run(self.client.course_details(course_id)).await?;
        self.state
            .write()
            .await
            .course_details
            .insert(course.id, course.clone());
        Ok(course)
    }

    /// Create a course through the admin route. Returns the new course id.
    pub async fn create_course(&self, form: NewCourseForm) -> Result<Uuid, ClientError> {
        self.run(self.client.create_course(form)).await
    }

    // My-courses slice

    pub async fn purchase(&self, course_id: Uuid) -> Result<Course, ClientError> {
        self.run(self.client.purchase_course(course_id)).await
    }

    pub async fn fetch_my_courses(&self) -> Result<(), ClientError> {
        let my_courses = self.run(self.client.my_courses()).await?;
        self.state.write().await.my_courses = my_courses;
        Ok(())
    }

    /// Mark a purchase as completed and patch the cached entry.
    pub async fn complete_course(&self, course_id: Uuid) -> Result<(), ClientError> {
        let enrollment = self.run(self.client.complete_course(course_id)).await?;

        let mut state = self.state.write().await;
        if let Some(entry) = state
            .my_courses
            .iter_mut()
            .find(|entry| entry.course.id == enrollment.course_id)
        {
            entry.status = enrollment.status;
            entry.progress = enrollment.progress;
        }
        Ok(())
    }

    // Selectors

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    pub async fn courses(&self) -> Vec<Course> {
        self.state.read().await.courses.clone()
    }

    pub async fn course(&self, course_id: Uuid) -> Option<Course> {
        self.state.read().await.course_details.get(&course_id).cloned()
    }

    pub async fn my_courses(&self) -> Vec<EnrolledCourse> {
        self.state.read().await.my_courses.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }
}
