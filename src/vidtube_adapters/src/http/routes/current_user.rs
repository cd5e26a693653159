use axum::{Extension, extract::State, response::IntoResponse};
use vidtube_application::CurrentUserUseCase;
use vidtube_core::{AccessClaims, MediaStore, UserStore};

use super::{error::ApiError, response::ApiResponse};
use crate::http::state::AppState;

#[tracing::instrument(name = "Current user", skip_all)]
pub async fn current_user<U, M>(
    State(state): State<AppState<U, M>>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let user = CurrentUserUseCase::new(&*state.user_store)
        .execute(claims.sub)
        .await?;

    Ok(ApiResponse::ok(user, "Current user fetched successfully"))
}
