use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use vidtube_application::LoginUseCase;
use vidtube_core::{AccessToken, Email, MediaStore, Password, RefreshToken, UserProfile, UserStore};

use super::{error::ApiError, response::ApiResponse};
use crate::{auth::with_session_cookies, http::state::AppState};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: UserProfile,
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, M>(
    State(state): State<AppState<U, M>>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let Json(request) = payload?;

    let email = Email::parse(request.email.as_deref().unwrap_or_default())?;
    let password = Password::parse(
        request.password.unwrap_or_else(|| Secret::new(String::new())),
        "password",
    )?;

    let use_case = LoginUseCase::new(
        &*state.user_store,
        &*state.credential_verifier,
        &*state.token_issuer,
    );
    let response = use_case.execute(email, password).await?;

    let jar = with_session_cookies(jar, &response.tokens, state.secure_cookies);
    let data = LoginData {
        user: response.user,
        access_token: response.tokens.access_token,
        refresh_token: response.tokens.refresh_token,
    };

    Ok((jar, ApiResponse::ok(data, "User logged in successfully")))
}
