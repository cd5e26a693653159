use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_clear_cookies_and_invalidate_refresh_token() {
    let app = TestApp::new().await;
    let (_, _, login) = app.signed_in_user().await;
    let refresh_token = login["data"]["refreshToken"].as_str().unwrap().to_string();

    let response = app.post_logout().await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], json!({}));

    // Cookies are gone from the client's jar.
    assert_eq!(app.get("/current-user").await.status().as_u16(), 401);

    let refresh = reqwest::Client::new()
        .post(app.url("/refresh-token"))
        .json(&json!({ "refreshToken": refresh_token }))
        .send()
        .await
        .unwrap();
    assert_eq!(refresh.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_without_access_token() {
    let app = TestApp::new().await;

    let response = app.post_logout().await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_accept_bearer_token() {
    let app = TestApp::new().await;
    let (_, _, login) = app.signed_in_user().await;
    let access_token = login["data"]["accessToken"].as_str().unwrap();

    let response = reqwest::Client::new()
        .get(app.url("/current-user"))
        .bearer_auth(access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}
