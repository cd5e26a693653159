use axum::{body::Bytes, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use vidtube_application::RefreshUseCase;
use vidtube_core::{MediaStore, RefreshToken, UserStore};

use super::{error::ApiError, response::ApiResponse};
use crate::{
    auth::with_session_cookies, config::REFRESH_TOKEN_COOKIE_NAME, http::state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    refresh_token: Option<String>,
}

/// The cookie wins over the body. The body is optional JSON.
fn presented_refresh_token(jar: &CookieJar, body: &[u8]) -> Option<String> {
    jar.get(REFRESH_TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
        .or_else(|| {
            serde_json::from_slice::<RefreshRequest>(body)
                .ok()
                .and_then(|request| request.refresh_token)
                .filter(|token| !token.trim().is_empty())
        })
}

#[tracing::instrument(name = "Refresh token", skip_all)]
pub async fn refresh_token<U, M>(
    State(state): State<AppState<U, M>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let presented = presented_refresh_token(&jar, &body)
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized request".to_string()))?;

    let use_case = RefreshUseCase::new(&*state.user_store, &*state.token_issuer);
    let tokens = use_case.execute(RefreshToken::new(presented)).await?;

    let jar = with_session_cookies(jar, &tokens, state.secure_cookies);
    Ok((jar, ApiResponse::ok(tokens, "Access token refreshed")))
}
