//! Typed wrapper over the server's HTTP surface.

use reqwest::multipart;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ClientError;
use crate::types::{
    AdminLoginData, Course, EnrolledCourse, Enrollment, Envelope, NewCourseForm,
    PurchasedCoursesData, UserLoginData,
};

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteCourseBody {
    course_id: String,
}

/// Async client for one Coursebay server.
///
/// Signing in stores the issued access token inside the client; every
/// protected call after that carries it as a bearer header, so one
/// `ApiClient` represents one signed-in principal (or an anonymous caller).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Replace the bearer token used for protected calls. `None` makes the
    /// client anonymous again.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // Accounts

    /// Register a user. Returns the server's confirmation message.
    pub async fn user_signup(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/users/signup"))
            .json(&Credentials { username, password })
            .send()
            .await?;

        let envelope = parse_envelope::<()>(response).await?;
        Ok(envelope.message)
    }

    /// Sign in as a user. The issued access token is kept for later calls.
    pub async fn user_signin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserLoginData, ClientError> {
        let response = self
            .http
            .post(self.url("/users/signin"))
            .json(&Credentials { username, password })
            .send()
            .await?;

        let data: UserLoginData = parse(response).await?;
        self.set_token(Some(data.access_token.clone())).await;
        Ok(data)
    }

    pub async fn admin_signup(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/admin/signup"))
            .json(&Credentials { username, password })
            .send()
            .await?;

        let envelope = parse_envelope::<()>(response).await?;
        Ok(envelope.message)
    }

    pub async fn admin_signin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminLoginData, ClientError> {
        let response = self
            .http
            .post(self.url("/admin/signin"))
            .json(&Credentials { username, password })
            .send()
            .await?;

        let data: AdminLoginData = parse(response).await?;
        self.set_token(Some(data.access_token.clone())).await;
        Ok(data)
    }

    // Courses

    /// Create a course (admin). Returns the new course id.
    ///
    /// Prerequisites and syllabus travel as JSON-encoded form fields, the
    /// way the web frontend submits them.
    pub async fn create_course(&self, form: NewCourseForm) -> Result<Uuid, ClientError> {
        let syllabus = serde_json::to_string(&form.syllabus)
            .map_err(|e| ClientError::Unexpected(format!("Failed to encode syllabus: {}", e)))?;
        let prerequisites = serde_json::to_string(&form.prerequisites).map_err(|e| {
            ClientError::Unexpected(format!("Failed to encode prerequisites: {}", e))
        })?;

        let image = multipart::Part::bytes(form.image_bytes).file_name(form.image_file_name);
        let body = multipart::Form::new()
            .text("title", form.title)
            .text("description", form.description)
            .text("price", form.price.to_string())
            .text("instructor", form.instructor)
            .text("enrollmentStatus", form.enrollment_status.as_str())
            .text("duration", form.duration)
            .text("schedule", form.schedule)
            .text("location", form.location)
            .text("prerequisites", prerequisites)
            .text("syllabus", syllabus)
            .part("imageLink", image);

        let response = self
            .authorized(self.http.post(self.url("/admin/courses")))
            .await
            .multipart(body)
            .send()
            .await?;

        parse(response).await
    }

    /// The whole catalog, admin view.
    pub async fn admin_courses(&self) -> Result<Vec<Course>, ClientError> {
        let response = self
            .authorized(self.http.get(self.url("/admin/courses")))
            .await
            .send()
            .await?;

        parse(response).await
    }

    /// The whole catalog, as a signed-in user.
    pub async fn courses(&self) -> Result<Vec<Course>, ClientError> {
        let response = self
            .authorized(self.http.get(self.url("/users/courses")))
            .await
            .send()
            .await?;

        parse(response).await
    }

    /// One course by id. Needs no authentication.
    pub async fn course_details(&self, course_id: Uuid) -> Result<Course, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/users/courses/{}", course_id)))
            .send()
            .await?;

        parse(response).await
    }

    /// Case-insensitive title search. A miss is `ClientError::Api` with
    /// status 404.
    pub async fn search_courses(&self, title: &str) -> Result<Vec<Course>, ClientError> {
        let response = self
            .http
            .get(self.url("/users/search-courses"))
            .query(&[("title", title)])
            .send()
            .await?;

        parse(response).await
    }

    // Enrollments

    /// The signed-in user's account with purchases inline.
    pub async fn purchased_courses(&self) -> Result<PurchasedCoursesData, ClientError> {
        let response = self
            .authorized(self.http.get(self.url("/users/purchasedCourses")))
            .await
            .send()
            .await?;

        parse(response).await
    }

    /// Buy a course. A repeat purchase is `ClientError::Api` with status 409.
    pub async fn purchase_course(&self, course_id: Uuid) -> Result<Course, ClientError> {
        let response = self
            .authorized(self.http.post(self.url(&format!("/users/purchase/{}", course_id))))
            .await
            .send()
            .await?;

        parse(response).await
    }

    /// Purchases joined with course details and progress.
    pub async fn my_courses(&self) -> Result<Vec<EnrolledCourse>, ClientError> {
        let response = self
            .authorized(self.http.get(self.url("/users/mycourses")))
            .await
            .send()
            .await?;

        parse(response).await
    }

    /// Mark a purchased course as completed.
    pub async fn complete_course(&self, course_id: Uuid) -> Result<Enrollment, ClientError> {
        let response = self
            .authorized(self.http.post(self.url("/courses/complete")))
            .await
            .json(&CompleteCourseBody {
                course_id: course_id.to_string(),
            })
            .send()
            .await?;

        parse(response).await
    }
}

/// Read the envelope, turning `success: false` into [`ClientError::Api`].
async fn parse_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Envelope<T>, ClientError> {
    let envelope: Envelope<T> = response.json().await?;

    if !envelope.success {
        return Err(ClientError::Api {
            status: envelope.status_code,
            message: envelope.message,
        });
    }

    Ok(envelope)
}

/// Like [`parse_envelope`], for endpoints whose success always carries data.
async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    parse_envelope(response)
        .await?
        .data
        .ok_or_else(|| ClientError::Unexpected("response envelope carried no data".to_string()))
}
