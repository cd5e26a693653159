use reqwest::multipart::Form;
use serde_json::Value;

use crate::helpers::{TestApp, image_part};

#[tokio::test]
async fn replacing_avatar_deletes_the_previous_asset() {
    let app = TestApp::new().await;
    let (_, _, login) = app.signed_in_user().await;
    let previous = login["data"]["user"]["avatar"]["assetId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .http_client
        .patch(app.url("/avatar"))
        .multipart(Form::new().part("avatar", image_part("new-avatar.png")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(
        body["data"]["avatar"]["url"]
            .as_str()
            .unwrap()
            .ends_with("new-avatar.png")
    );
    assert!(!app.media_store.contains(&previous).await);
    assert!(app.media_store.deleted().await.contains(&previous));
}

#[tokio::test]
async fn cover_image_update_requires_a_file() {
    let app = TestApp::new().await;
    let _ = app.signed_in_user().await;

    let response = app
        .http_client
        .patch(app.url("/cover-image"))
        .multipart(Form::new().text("note", "no file here"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn cover_image_can_be_added_after_registration() {
    let app = TestApp::new().await;
    let _ = app.signed_in_user().await;

    let response = app
        .http_client
        .patch(app.url("/cover-image"))
        .multipart(Form::new().part("coverImage", image_part("banner.png")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["data"]["coverImage"]["url"].as_str().is_some());
}

#[tokio::test]
async fn delete_account_removes_user_media_and_session() {
    let app = TestApp::new().await;
    let (user, _, login) = app.signed_in_user().await;
    let avatar = login["data"]["user"]["avatar"]["assetId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .http_client
        .delete(app.url("/delete-account"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    assert!(!app.media_store.contains(&avatar).await);
    assert_eq!(app.get("/current-user").await.status().as_u16(), 401);

    let login = app
        .post_login(&serde_json::json!({ "email": user.email, "password": user.password }))
        .await;
    assert_eq!(login.status().as_u16(), 404);
}
