use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use vidtube_application::UpdateAccountUseCase;
use vidtube_core::{AccessClaims, AccountDetails, MediaStore, UserStore};

use super::{error::ApiError, response::ApiResponse};
use crate::http::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[tracing::instrument(name = "Update account", skip_all)]
pub async fn update_account<U, M>(
    State(state): State<AppState<U, M>>,
    Extension(claims): Extension<AccessClaims>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let Json(request) = payload?;
    let details = AccountDetails::parse(request.full_name.as_deref(), request.email.as_deref())?;

    let user = UpdateAccountUseCase::new(&*state.user_store)
        .execute(claims.sub, details)
        .await?;

    Ok(ApiResponse::ok(user, "Account details updated successfully"))
}
