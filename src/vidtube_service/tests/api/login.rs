use serde_json::{Value, json};

use crate::helpers::{TestApp, TestUser};

#[tokio::test]
async fn should_return_200_set_cookies_and_return_tokens() {
    let app = TestApp::new().await;
    let user = TestUser::random();
    app.register(user.form(None)).await;

    let response = app
        .post_login(&json!({ "email": user.email, "password": user.password }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let cookie_names: Vec<String> = response.cookies().map(|c| c.name().to_string()).collect();
    assert!(cookie_names.contains(&"accessToken".to_string()));
    assert!(cookie_names.contains(&"refreshToken".to_string()));
    assert!(response.cookies().all(|c| c.http_only()));

    let body: Value = response.json().await.unwrap();
    assert!(body["data"]["accessToken"].as_str().is_some());
    assert!(body["data"]["refreshToken"].as_str().is_some());
    assert_eq!(body["data"]["user"]["username"], user.username.to_lowercase());
}

#[tokio::test]
async fn should_return_401_for_wrong_password() {
    let app = TestApp::new().await;
    let user = TestUser::random();
    app.register(user.form(None)).await;

    let response = app
        .post_login(&json!({ "email": user.email, "password": "definitely-wrong" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(response.cookies().count(), 0);
}

#[tokio::test]
async fn should_return_404_for_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .post_login(&json!({ "email": "nobody@example.com", "password": "whatever" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_400_for_missing_fields() {
    let app = TestApp::new().await;

    let inputs = [
        json!({ "password": "secret" }),
        json!({ "email": "someone@example.com" }),
        json!({ "email": "  ", "password": "secret" }),
    ];

    for input in inputs {
        let response = app.post_login(&input).await;
        assert_eq!(response.status().as_u16(), 400, "input: {input}");
    }
}
