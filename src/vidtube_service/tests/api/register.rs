use serde_json::Value;
use vidtube_core::{Email, UserStore};

use crate::helpers::{TestApp, TestUser};

#[tokio::test]
async fn should_return_201_with_sanitized_user() {
    let app = TestApp::new().await;
    let user = TestUser::random();

    let response = app.register(user.form(Some("cover.png"))).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");

    let data = &body["data"];
    assert_eq!(data["username"], user.username.to_lowercase());
    assert_eq!(data["email"], user.email.to_lowercase());
    assert!(data["avatar"]["url"].as_str().unwrap().ends_with("avatar.png"));
    assert!(data["coverImage"]["url"].as_str().unwrap().ends_with("cover.png"));
    assert!(data.get("password").is_none());
    assert!(data.get("passwordHash").is_none());
    assert!(data.get("refreshToken").is_none());

    assert_eq!(app.media_store.asset_count().await, 2);
}

#[tokio::test]
async fn should_return_400_when_avatar_is_missing() {
    let app = TestApp::new().await;
    let user = TestUser::random();
    let form = reqwest::multipart::Form::new()
        .text("fullName", user.full_name.clone())
        .text("email", user.email.clone())
        .text("username", user.username.clone())
        .text("password", user.password.clone());

    let response = app.register(form).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(app.media_store.upload_count().await, 0);
}

#[tokio::test]
async fn should_return_400_for_blank_or_invalid_fields() {
    let app = TestApp::new().await;

    let mut blank_name = TestUser::random();
    blank_name.full_name = "   ".to_string();
    let mut bad_email = TestUser::random();
    bad_email.email = "not-an-email".to_string();

    for user in [blank_name, bad_email] {
        let response = app.register(user.form(None)).await;
        assert_eq!(response.status().as_u16(), 400, "input: {user:?}");
    }
    assert_eq!(app.media_store.upload_count().await, 0);
}

#[tokio::test]
async fn should_return_409_for_taken_username_or_email() {
    let app = TestApp::new().await;
    let user = TestUser::random();
    assert_eq!(app.register(user.form(None)).await.status().as_u16(), 201);

    let mut same_username = TestUser::random();
    same_username.username = user.username.to_uppercase();
    let mut same_email = TestUser::random();
    same_email.email = user.email.clone();

    for duplicate in [same_username, same_email] {
        let response = app.register(duplicate.form(None)).await;
        assert_eq!(response.status().as_u16(), 409);
    }

    assert_eq!(app.media_store.upload_count().await, 1);
}

#[tokio::test]
async fn failed_cover_upload_removes_avatar_and_creates_no_user() {
    let app = TestApp::new().await;
    app.media_store.fail_uploads_named("broken-cover.png").await;
    let user = TestUser::random();

    let response = app.register(user.form(Some("broken-cover.png"))).await;

    assert_eq!(response.status().as_u16(), 502);
    assert_eq!(app.media_store.asset_count().await, 0);
    assert_eq!(app.media_store.deleted().await.len(), 1);

    let email = Email::parse(&user.email).unwrap();
    assert!(!app.user_store.email_exists(&email).await.unwrap());
}
