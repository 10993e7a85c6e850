use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{admin_signin, admin_signup, user_signin, user_signup};

pub fn init_user_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(user_signup))
        .route("/signin", post(user_signin))
}

pub fn init_admin_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(admin_signup))
        .route("/signin", post(admin_signin))
}
