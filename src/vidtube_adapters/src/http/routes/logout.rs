use axum::{Extension, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use vidtube_application::LogoutUseCase;
use vidtube_core::{AccessClaims, MediaStore, UserStore};

use super::{
    error::ApiError,
    response::{ApiResponse, Empty},
};
use crate::{auth::without_session_cookies, http::state::AppState};

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<U, M>(
    State(state): State<AppState<U, M>>,
    Extension(claims): Extension<AccessClaims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let use_case = LogoutUseCase::new(&*state.user_store, &*state.token_issuer);
    use_case.execute(claims.sub).await?;

    let jar = without_session_cookies(jar, state.secure_cookies);
    Ok((jar, ApiResponse::ok(Empty {}, "User logged out")))
}
