use axum::{Extension, extract::State, response::IntoResponse};
use vidtube_application::WatchHistoryUseCase;
use vidtube_core::{AccessClaims, MediaStore, UserStore};

use super::{error::ApiError, response::ApiResponse};
use crate::http::state::AppState;

#[tracing::instrument(name = "Watch history", skip_all)]
pub async fn watch_history<U, M>(
    State(state): State<AppState<U, M>>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let history = WatchHistoryUseCase::new(&*state.user_store)
        .execute(claims.sub)
        .await?;

    Ok(ApiResponse::ok(history, "Watch history fetched successfully"))
}
