use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use vidtube_core::AuthValidator;

use super::{routes::error::ApiError, state::AppState};

/// Rejects the request unless it carries a valid access token. The decoded
/// `AccessClaims` are stored in the request extensions.
pub async fn require_auth<U, M>(
    State(state): State<AppState<U, M>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    U: Send + Sync + 'static,
    M: Send + Sync + 'static,
{
    let (mut parts, body) = request.into_parts();
    let claims = state.access_validator.validate(&parts).await?;
    parts.extensions.insert(claims);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Like [`require_auth`], but lets anonymous requests through. A missing or
/// invalid token simply leaves no claims behind.
pub async fn optional_auth<U, M>(
    State(state): State<AppState<U, M>>,
    request: Request,
    next: Next,
) -> Response
where
    U: Send + Sync + 'static,
    M: Send + Sync + 'static,
{
    let (mut parts, body) = request.into_parts();
    if let Ok(claims) = state.access_validator.validate(&parts).await {
        parts.extensions.insert(claims);
    }

    next.run(Request::from_parts(parts, body)).await
}
