//! Middleware modules for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends a request with the `accessToken` cookie or an
//!    `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] / [`auth::AuthAdmin`] validate the JWT and load the
//!    matching account from the store
//! 3. Handler executes with the caller's [`auth::CurrentPrincipal`] attached
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthAdmin, AuthUser};
//!
//! // Only signed-in users reach this handler
//! async fn my_courses(AuthUser(principal): AuthUser) -> impl IntoResponse {
//!     // ...
//! }
//!
//! // Only signed-in admins reach this handler
//! async fn create_course(AuthAdmin(principal): AuthAdmin) -> impl IntoResponse {
//!     // ...
//! }
//! ```

pub mod auth;
