use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use vidtube_application::ChannelProfileUseCase;
use vidtube_core::{AccessClaims, MediaStore, UserStore, Username};

use super::{error::ApiError, response::ApiResponse};
use crate::http::state::AppState;

#[tracing::instrument(name = "Channel profile", skip_all)]
pub async fn channel_profile<U, M>(
    State(state): State<AppState<U, M>>,
    viewer: Option<Extension<AccessClaims>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let username = Username::parse(&username)?;
    let viewer = viewer.map(|Extension(claims)| claims.sub);

    let channel = ChannelProfileUseCase::new(&*state.user_store)
        .execute(username, viewer)
        .await?;

    Ok(ApiResponse::ok(channel, "User channel fetched successfully"))
}
