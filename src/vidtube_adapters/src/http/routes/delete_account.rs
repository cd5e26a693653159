use axum::{Extension, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use vidtube_application::DeleteAccountUseCase;
use vidtube_core::{AccessClaims, MediaStore, UserStore};

use super::{
    error::ApiError,
    response::{ApiResponse, Empty},
};
use crate::{auth::without_session_cookies, http::state::AppState};

#[tracing::instrument(name = "Delete account", skip_all)]
pub async fn delete_account<U, M>(
    State(state): State<AppState<U, M>>,
    Extension(claims): Extension<AccessClaims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    DeleteAccountUseCase::new(&*state.user_store, &*state.media_store)
        .execute(claims.sub)
        .await?;

    let jar = without_session_cookies(jar, state.secure_cookies);
    Ok((jar, ApiResponse::ok(Empty {}, "Account deleted successfully")))
}
