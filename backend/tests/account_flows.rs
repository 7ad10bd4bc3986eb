mod common;

use axum::http::{header::WWW_AUTHENTICATE, Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use common::spawn;

#[tokio::test]
async fn register_login_profile_scenario() {
    let app = spawn().await;

    let reply = app.register("alice", "a@x.com", "secret1").await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["username"], "alice");
    assert_eq!(reply.body["email"], "a@x.com");
    assert!(reply.body["id"].is_i64());
    assert!(reply.body.get("password_hash").is_none());

    let reply = app.login("alice", "secret1").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["token_type"], "bearer");
    let token = reply.body["access_token"].as_str().unwrap().to_string();

    let reply = app.get("/profile", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["username"], "alice");
    assert_eq!(reply.body["email"], "a@x.com");
    assert_eq!(reply.body["message"], "welcome MR : alice");

    let nested = app.get("/users/profile", Some(&token)).await;
    assert_eq!(nested.status, StatusCode::OK);
    assert_eq!(nested.body, reply.body);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = spawn().await;
    app.register("alice", "a@x.com", "secret1").await;

    let reply = app.register("alice", "other@x.com", "secret1").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["detail"], "Username already exists!");

    let reply = app.register("bob", "a@x.com", "secret1").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["detail"], "Email is already registered!");
}

#[tokio::test]
async fn invalid_registration_is_unprocessable() {
    let app = spawn().await;

    let reply = app.register("alice", "a@x.com", "123").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let reply = app.register("alice", "nope", "secret1").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn incomplete_registration_gets_detail_body() {
    let app = spawn().await;

    let reply = app
        .json(
            Method::POST,
            "/register",
            None,
            json!({ "username": "alice", "password": "secret1" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body["detail"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn malformed_json_gets_detail_body() {
    let app = spawn().await;

    let reply = app.raw("/register", "application/json", "{\"username\":").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body["detail"].is_string());
}

#[tokio::test]
async fn incomplete_login_form_gets_detail_body() {
    let app = spawn().await;
    app.register("alice", "a@x.com", "secret1").await;

    let reply = app
        .raw("/login", "application/x-www-form-urlencoded", "username=alice")
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body["detail"].is_string());
}

#[tokio::test]
async fn wrong_password_login_is_indistinguishable() {
    let app = spawn().await;
    app.register("alice", "a@x.com", "secret1").await;

    let known = app.login("alice", "wrong-pw").await;
    let unknown = app.login("nobody", "wrong-pw").await;

    assert_eq!(known.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(known.body, unknown.body);
    assert_eq!(known.body["detail"], "Could not validate credentials");
    assert_eq!(known.headers[WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = spawn().await;

    let reply = app.get("/profile", None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.headers[WWW_AUTHENTICATE], "Bearer");

    let reply = app.get("/profile", Some("garbage")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["detail"], "Invalid or expired token");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = spawn().await;
    app.register("alice", "a@x.com", "secret1").await;

    let stale = app
        .tokens
        .issue_at("alice", Utc::now() - Duration::minutes(61))
        .unwrap();

    let reply = app.get("/profile", Some(&stale)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["detail"], "Invalid or expired token");
}

#[tokio::test]
async fn change_password_then_login() {
    let app = spawn().await;
    let token = app.signed_in("alice", "a@x.com", "secret1").await;

    let reply = app
        .json(
            Method::PUT,
            "/users/update-password",
            Some(&token),
            json!({ "old_password": "secret1", "new_password": "secret2" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "Password updated successfully!");

    assert_eq!(app.login("alice", "secret2").await.status, StatusCode::OK);
    assert_eq!(app.login("alice", "secret1").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_with_wrong_old_password() {
    let app = spawn().await;
    let token = app.signed_in("alice", "a@x.com", "secret1").await;

    let reply = app
        .json(
            Method::PUT,
            "/users/update-password",
            Some(&token),
            json!({ "old_password": "not-it!", "new_password": "secret2" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["detail"], "Incorrect old password.");
}

#[tokio::test]
async fn update_profile_and_email_conflict() {
    let app = spawn().await;
    let token = app.signed_in("alice", "a@x.com", "secret1").await;
    app.register("bob", "b@x.com", "secret1").await;

    let reply = app
        .json(
            Method::PUT,
            "/users/update",
            Some(&token),
            json!({ "username": "alice", "email": "b@x.com" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["detail"], "Email already in use.");

    let reply = app
        .json(
            Method::PUT,
            "/users/update",
            Some(&token),
            json!({ "username": "alice", "email": "alice@x.com" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["email"], "alice@x.com");

    let profile = app.get("/profile", Some(&token)).await;
    assert_eq!(profile.body["email"], "alice@x.com");
}

#[tokio::test]
async fn renamed_user_invalidates_old_subject() {
    let app = spawn().await;
    let token = app.signed_in("alice", "a@x.com", "secret1").await;

    let reply = app
        .json(
            Method::PUT,
            "/users/update",
            Some(&token),
            json!({ "username": "alicia", "email": "a@x.com" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = app.get("/profile", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.login("alicia", "secret1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn delete_account_revokes_access() {
    let app = spawn().await;
    let token = app.signed_in("alice", "a@x.com", "secret1").await;

    let reply = app
        .json(
            Method::DELETE,
            "/users/delete",
            Some(&token),
            json!({ "password": "wrong-pw" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["detail"], "Incorrect password.");

    let reply = app
        .json(
            Method::DELETE,
            "/users/delete",
            Some(&token),
            json!({ "password": "secret1" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "Account deleted successfully!");

    let reply = app.get("/profile", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["detail"], "User is not present in the database");

    assert_eq!(app.login("alice", "secret1").await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.register("alice", "a@x.com", "secret1").await.status,
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = spawn().await;

    let reply = app.get("/", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "Diabetes Prediction API is running!");
}
