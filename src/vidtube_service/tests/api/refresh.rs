use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_rotate_tokens_and_reject_the_old_refresh_token() {
    let app = TestApp::new().await;
    let (_, _, login) = app.signed_in_user().await;
    let original = login["data"]["refreshToken"].as_str().unwrap().to_string();

    let response = app.post_refresh().await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let rotated = body["data"]["refreshToken"].as_str().unwrap();
    assert_ne!(rotated, original);

    let replay = reqwest::Client::new()
        .post(app.url("/refresh-token"))
        .json(&json!({ "refreshToken": original }))
        .send()
        .await
        .unwrap();
    assert_eq!(replay.status().as_u16(), 401);
}

#[tokio::test]
async fn should_accept_refresh_token_from_body() {
    let app = TestApp::new().await;
    let (_, _, login) = app.signed_in_user().await;
    let token = login["data"]["refreshToken"].as_str().unwrap();

    let response = reqwest::Client::new()
        .post(app.url("/refresh-token"))
        .json(&json!({ "refreshToken": token }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_without_a_token() {
    let app = TestApp::new().await;

    let response = app.post_refresh().await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized request");
}

#[tokio::test]
async fn should_return_401_for_garbage_token() {
    let app = TestApp::new().await;

    let response = reqwest::Client::new()
        .post(app.url("/refresh-token"))
        .json(&json!({ "refreshToken": "not-a-jwt" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}
