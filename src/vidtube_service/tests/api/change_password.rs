use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn should_change_password_and_allow_login_with_new_one() {
    let app = TestApp::new().await;
    let (user, _, _) = app.signed_in_user().await;

    let response = app
        .http_client
        .post(app.url("/change-password"))
        .json(&json!({ "oldPassword": user.password, "newPassword": "brand-new-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let old = app
        .post_login(&json!({ "email": user.email, "password": user.password }))
        .await;
    assert_eq!(old.status().as_u16(), 401);

    let new = app
        .post_login(&json!({ "email": user.email, "password": "brand-new-password" }))
        .await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_for_wrong_old_password() {
    let app = TestApp::new().await;
    let (user, _, _) = app.signed_in_user().await;

    let response = app
        .http_client
        .post(app.url("/change-password"))
        .json(&json!({ "oldPassword": "not-my-password", "newPassword": "whatever-else" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let login = app
        .post_login(&json!({ "email": user.email, "password": user.password }))
        .await;
    assert_eq!(login.status().as_u16(), 200);
}
