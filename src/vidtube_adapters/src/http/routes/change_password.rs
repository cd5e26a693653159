use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use secrecy::Secret;
use serde::Deserialize;
use vidtube_application::ChangePasswordUseCase;
use vidtube_core::{AccessClaims, MediaStore, Password, UserStore};

use super::{
    error::ApiError,
    response::{ApiResponse, Empty},
};
use crate::http::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<Secret<String>>,
    pub new_password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<U, M>(
    State(state): State<AppState<U, M>>,
    Extension(claims): Extension<AccessClaims>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let Json(request) = payload?;

    let blank = || Secret::new(String::new());
    let old_password = Password::parse(request.old_password.unwrap_or_else(blank), "oldPassword")?;
    let new_password = Password::parse(request.new_password.unwrap_or_else(blank), "newPassword")?;

    let use_case = ChangePasswordUseCase::new(&*state.user_store, &*state.credential_verifier);
    use_case
        .execute(claims.sub, old_password, new_password)
        .await?;

    Ok(ApiResponse::ok(Empty {}, "Password changed successfully"))
}
