use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, request},
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use vidtube_adapters::{
    config::{AllowedOrigins, MAX_BODY_BYTES},
    http::{
        AppState, optional_auth, require_auth,
        routes::{
            change_password, channel_profile, current_user, delete_account, login, logout,
            refresh_token, register, update_account, update_avatar, update_cover_image,
            watch_history,
        },
    },
};
use vidtube_core::{MediaStore, UserStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

const API_PREFIX: &str = "/api/v1/users";

/// The user-account API: registration, sessions, profile and channel routes.
pub struct AppService {
    router: Router,
}

impl AppService {
    /// Builds every route over a shared [`AppState`].
    ///
    /// Routes behind `require_auth` see the caller's `AccessClaims` as a
    /// request extension. The channel route runs `optional_auth` so that an
    /// anonymous visitor still gets the profile.
    pub fn new<U, M>(state: AppState<U, M>) -> Self
    where
        U: UserStore + 'static,
        M: MediaStore + 'static,
    {
        let public = Router::new()
            .route("/register", post(register::<U, M>))
            .route("/login", post(login::<U, M>))
            .route("/refresh-token", post(refresh_token::<U, M>));

        let authenticated = Router::new()
            .route("/logout", post(logout::<U, M>))
            .route("/change-password", post(change_password::<U, M>))
            .route("/current-user", get(current_user::<U, M>))
            .route("/update-account", patch(update_account::<U, M>))
            .route("/avatar", patch(update_avatar::<U, M>))
            .route("/cover-image", patch(update_cover_image::<U, M>))
            .route("/history", get(watch_history::<U, M>))
            .route("/delete-account", delete(delete_account::<U, M>))
            .route_layer(from_fn_with_state(state.clone(), require_auth::<U, M>));

        let channel = Router::new()
            .route("/c/{username}", get(channel_profile::<U, M>))
            .route_layer(from_fn_with_state(state.clone(), optional_auth::<U, M>));

        let router = public
            .merge(authenticated)
            .merge(channel)
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Converts the service into a router mounted under `/api/v1/users`.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        self.router = self.router.layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }

        let router = self.with_trace_layer().router;
        Router::new().nest(API_PREFIX, router)
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("VidTube API listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
