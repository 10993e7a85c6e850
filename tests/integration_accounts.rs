mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{create_test_user, generate_unique_username, test_state};
use coursebay::router::init_router;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

fn setup_test_app() -> (axum::Router, coursebay::state::AppState) {
    let state = test_state();
    (init_router(state.clone()), state)
}

async fn get_auth_token(app: axum::Router, username: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/users/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["data"]["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_user_signup_success() {
    let (app, _state) = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/users/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": generate_unique_username(),
                "password": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["success"], true);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_user_signup_duplicate_username() {
    let (app, _state) = setup_test_app();
    let username = generate_unique_username();

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let request = Request::builder()
            .method("POST")
            .uri("/users/signup")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({
                    "username": username,
                    "password": "testpass123"
                }))
                .unwrap(),
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn test_user_signup_missing_password() {
    let (app, _state) = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/users/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": "someone"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "password is required");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_user_signup_rejects_whitespace_credentials() {
    let (app, _state) = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/users/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": "   ",
                "password": "  "
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Username & Password both are required");
}

#[tokio::test]
async fn test_user_signin_success() {
    let (app, state) = setup_test_app();

    let username = generate_unique_username();
    let password = "testpass123";
    create_test_user(&state, &username, password).await;

    let request = Request::builder()
        .method("POST")
        .uri("/users/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let access_cookie = cookies
        .iter()
        .find(|c| c.starts_with("accessToken="))
        .expect("accessToken cookie should be set");
    assert!(access_cookie.contains("HttpOnly"));
    assert!(access_cookie.contains("Secure"));
    assert!(
        cookies.iter().any(|c| c.starts_with("refreshToken=")),
        "refreshToken cookie should be set"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["message"], "User logged in successfully");
    assert!(body["data"]["accessToken"].as_str().is_some());
    assert!(body["data"]["refreshToken"].as_str().is_some());
    assert_eq!(body["data"]["user"]["username"], username);
    assert_eq!(body["data"]["user"]["purchasedCourse"], json!([]));
    assert!(body["data"]["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_user_signin_wrong_password() {
    let (app, state) = setup_test_app();

    let username = generate_unique_username();
    create_test_user(&state, &username, "correctpass").await;

    let request = Request::builder()
        .method("POST")
        .uri("/users/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": "wrongpassword"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_user_signin_unknown_username() {
    let (app, _state) = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/users/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": "nobody-here",
                "password": "whatever"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_usernames_are_case_insensitive() {
    let (app, _state) = setup_test_app();
    let suffix = generate_unique_username();

    let request = Request::builder()
        .method("POST")
        .uri("/users/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": format!("  Alice-{}  ", suffix),
                "password": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Signin with different casing and surrounding whitespace still matches
    let request = Request::builder()
        .method("POST")
        .uri("/users/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": format!("ALICE-{}", suffix),
                "password": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body["data"]["user"]["username"],
        format!("alice-{}", suffix)
    );

    // A differently-cased signup collides with the stored lowercase name
    let request = Request::builder()
        .method("POST")
        .uri("/users/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": format!("alice-{}", suffix),
                "password": "otherpass"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_signup_and_signin() {
    let (app, _state) = setup_test_app();
    let username = generate_unique_username();

    let request = Request::builder()
        .method("POST")
        .uri("/admin/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": "adminpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Admin created successfully");

    let request = Request::builder()
        .method("POST")
        .uri("/admin/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": "adminpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["message"], "Admin logged in successfully");
    assert!(body["data"]["accessToken"].as_str().is_some());
    assert_eq!(body["data"]["admin"]["username"], username);
    assert!(body["data"].get("user").is_none());
}

#[tokio::test]
async fn test_user_and_admin_namespaces_are_separate() {
    let (app, _state) = setup_test_app();
    let username = generate_unique_username();

    // The same username registers once under each role
    for uri in ["/users/signup", "/admin/signup"] {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({
                    "username": username,
                    "password": "testpass123"
                }))
                .unwrap(),
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // A user-only account cannot sign in through the admin route
    let other = generate_unique_username();
    let request = Request::builder()
        .method("POST")
        .uri("/users/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": other,
                "password": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .method("POST")
        .uri("/admin/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": other,
                "password": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signin_requires_json_content_type() {
    let (app, _state) = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/users/signin")
        .body(Body::from(r#"{"username":"a","password":"b"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body["message"],
        "Missing 'Content-Type: application/json' header"
    );
}

#[tokio::test]
async fn test_protected_route_rejects_missing_token() {
    let (app, _state) = setup_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/users/courses")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Unauthorized request");
}

#[tokio::test]
async fn test_protected_route_rejects_expired_token() {
    let (app, state) = setup_test_app();

    let username = generate_unique_username();
    let seeded = create_test_user(&state, &username, "testpass123").await;

    // Signed with the app's secret but already past its expiry.
    let expired_config = coursebay::config::auth::AuthConfig {
        access_expiry: -3600,
        ..state.auth_config.clone()
    };
    let token =
        coursebay::utils::jwt::create_access_token(seeded.id, &username, &expired_config).unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/users/courses")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_accepts_cookie() {
    let (app, state) = setup_test_app();

    let username = generate_unique_username();
    create_test_user(&state, &username, "testpass123").await;
    let token = get_auth_token(app.clone(), &username, "testpass123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/users/courses")
        .header(header::COOKIE, format!("accessToken={}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_accepts_bearer_header() {
    let (app, state) = setup_test_app();

    let username = generate_unique_username();
    create_test_user(&state, &username, "testpass123").await;
    let token = get_auth_token(app.clone(), &username, "testpass123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/users/courses")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_token_rejected_on_user_routes() {
    let (app, state) = setup_test_app();

    let username = generate_unique_username();
    common::create_test_admin(&state, &username, "adminpass123").await;

    let request = Request::builder()
        .method("POST")
        .uri("/admin/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": "adminpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let token = body["data"]["accessToken"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("GET")
        .uri("/users/courses")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signin_persists_refresh_token() {
    let (app, state) = setup_test_app();

    let username = generate_unique_username();
    let seeded = create_test_user(&state, &username, "testpass123").await;
    assert!(seeded.refresh_token.is_none());

    get_auth_token(app, &username, "testpass123").await;

    let stored = state
        .store
        .find_principal_by_id(coursebay::modules::accounts::model::Role::User, seeded.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.refresh_token.is_some());
}
