use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use secrecy::Secret;
use vidtube_application::RegisterUseCase;
use vidtube_core::{MediaStore, RegistrationRequest, UserStore};

use super::{error::ApiError, multipart::MultipartForm, response::ApiResponse};
use crate::http::state::AppState;

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, M>(
    State(state): State<AppState<U, M>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let mut form = MultipartForm::read(multipart).await?;

    let request = RegistrationRequest {
        full_name: form.take_field(&["fullName", "fullname"]),
        email: form.take_field(&["email"]),
        username: form.take_field(&["username"]),
        password: form.take_field(&["password"]).map(Secret::new),
        avatar: form.take_file("avatar"),
        cover_image: form.take_file("coverImage"),
    };

    let use_case = RegisterUseCase::new(&*state.user_store, &*state.media_store);
    let user = use_case.execute(request).await?;

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        user,
        "User registered successfully",
    ))
}
