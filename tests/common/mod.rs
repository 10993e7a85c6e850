use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use coursebay::assets::{AssetError, AssetStore, LocalAssetStore};
use coursebay::config::auth::AuthConfig;
use coursebay::config::cors::CorsConfig;
use coursebay::modules::accounts::model::{NewPrincipal, Principal, Role};
use coursebay::modules::courses::model::{Course, CourseStatus, NewCourse, SyllabusItem};
use coursebay::state::AppState;
use coursebay::store::MemoryStore;
use coursebay::utils::password::hash_password;
use uuid::Uuid;

/// Fresh state backed by the in-memory store. Uploads land in a throwaway
/// directory under the system temp dir.
pub fn test_state() -> AppState {
    let upload_dir = env::temp_dir().join(format!("coursebay-test-{}", Uuid::new_v4()));
    AppState {
        store: Arc::new(MemoryStore::new()),
        assets: Arc::new(LocalAssetStore::new(
            upload_dir,
            "http://localhost:8080/files".to_string(),
        )),
        auth_config: test_auth_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    }
}

/// Cost 4 is the bcrypt minimum and keeps the suite fast.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        access_secret: "access_test_secret_key".to_string(),
        access_expiry: 3600,
        refresh_secret: "refresh_test_secret_key".to_string(),
        refresh_expiry: 604800,
        hash_cost: 4,
    }
}

/// Seed a user account directly in the store. Usernames must already be
/// lowercase, matching what signup would have stored.
#[allow(dead_code)]
pub async fn create_test_user(state: &AppState, username: &str, password: &str) -> Principal {
    create_test_principal(state, Role::User, username, password).await
}

#[allow(dead_code)]
pub async fn create_test_admin(state: &AppState, username: &str, password: &str) -> Principal {
    create_test_principal(state, Role::Admin, username, password).await
}

async fn create_test_principal(
    state: &AppState,
    role: Role,
    username: &str,
    password: &str,
) -> Principal {
    let hashed = hash_password(password, state.auth_config.hash_cost).unwrap();
    state
        .store
        .insert_principal(
            role,
            NewPrincipal {
                username: username.to_string(),
                password_hash: hashed,
            },
        )
        .await
        .unwrap()
}

/// Seed a course directly in the store, skipping the multipart flow.
#[allow(dead_code)]
pub async fn create_test_course(state: &AppState, title: &str, owner: Uuid) -> Course {
    state
        .store
        .insert_course(NewCourse {
            title: title.to_string(),
            description: "Systems programming from the ground up".to_string(),
            price: 49.99,
            image_link: "http://localhost:8080/files/courses/seed.png".to_string(),
            instructor: "Ada Lovelace".to_string(),
            enrollment_status: CourseStatus::Open,
            duration: "8 weeks".to_string(),
            schedule: "Mon/Wed 18:00".to_string(),
            location: "Online".to_string(),
            prerequisites: vec!["Basic programming".to_string()],
            syllabus: vec![SyllabusItem {
                week: 1,
                topic: "Introduction".to_string(),
                content: "Course overview and setup".to_string(),
            }],
            owner,
        })
        .await
        .unwrap()
}

pub fn generate_unique_username() -> String {
    format!("user-{}", Uuid::new_v4())
}

/// Boundary used by [`multipart_body`]. The content type to send alongside
/// is [`multipart_content_type`].
#[allow(dead_code)]
pub const MULTIPART_BOUNDARY: &str = "------------------------coursebay";

#[allow(dead_code)]
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}

/// Render text fields and an optional file part as a multipart body.
#[allow(dead_code)]
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((name, file_name, content)) = file {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

/// Asset store that always fails, for exercising the upload error path.
#[allow(dead_code)]
pub struct FailingAssetStore;

#[async_trait]
impl AssetStore for FailingAssetStore {
    async fn save(&self, _key: &str, _content: &[u8]) -> Result<String, AssetError> {
        Err(AssetError::Io(std::io::Error::other("disk unavailable")))
    }

    fn url(&self, _key: &str) -> Result<String, AssetError> {
        Err(AssetError::Io(std::io::Error::other("disk unavailable")))
    }
}
