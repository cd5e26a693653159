use axum::{
    Extension,
    extract::{Multipart, State},
    response::IntoResponse,
};
use vidtube_application::{MediaSlot, UpdateMediaUseCase};
use vidtube_core::{AccessClaims, MediaStore, UserProfile, UserStore};

use super::{error::ApiError, multipart::MultipartForm, response::ApiResponse};
use crate::http::state::AppState;

async fn replace_media<U, M>(
    state: &AppState<U, M>,
    claims: AccessClaims,
    slot: MediaSlot,
    field: &str,
    multipart: Multipart,
) -> Result<UserProfile, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let mut form = MultipartForm::read(multipart).await?;

    let use_case = UpdateMediaUseCase::new(&*state.user_store, &*state.media_store);
    Ok(use_case
        .execute(claims.sub, slot, form.take_file(field))
        .await?)
}

#[tracing::instrument(name = "Update avatar", skip_all)]
pub async fn update_avatar<U, M>(
    State(state): State<AppState<U, M>>,
    Extension(claims): Extension<AccessClaims>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let user = replace_media(&state, claims, MediaSlot::Avatar, "avatar", multipart).await?;
    Ok(ApiResponse::ok(user, "Avatar updated successfully"))
}

#[tracing::instrument(name = "Update cover image", skip_all)]
pub async fn update_cover_image<U, M>(
    State(state): State<AppState<U, M>>,
    Extension(claims): Extension<AccessClaims>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let user = replace_media(
        &state,
        claims,
        MediaSlot::CoverImage,
        "coverImage",
        multipart,
    )
    .await?;
    Ok(ApiResponse::ok(user, "Cover image updated successfully"))
}
