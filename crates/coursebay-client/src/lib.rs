//! # Coursebay client
//!
//! Typed async client for the Coursebay API, plus an in-process state store
//! mirroring the web frontend's slices.
//!
//! [`ApiClient`] wraps every route the server exposes and unwraps the
//! uniform response envelope, turning error envelopes into
//! [`ClientError::Api`]. [`CourseStore`] sits on top and caches the session,
//! the course catalog, and the signed-in user's purchases, tracking a
//! `loading` flag and the last error the way the frontend's thunks do.
//!
//! ```ignore
//! use coursebay_client::{ApiClient, CourseStore};
//!
//! let store = CourseStore::new(ApiClient::new("http://localhost:8080"));
//! store.login_user("alice", "secret").await?;
//! store.fetch_courses().await?;
//! println!("{} courses", store.courses().await.len());
//! ```

pub mod client;
pub mod error;
pub mod state;
pub mod types;

pub use client::ApiClient;
pub use error::ClientError;
pub use state::{CourseStore, Session, SessionRole};
