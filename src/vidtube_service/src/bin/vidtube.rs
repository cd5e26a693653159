use color_eyre::eyre::{Result, eyre};
use vidtube_adapters::{
    auth::JwtTokenIssuer,
    config::{AppSettings, MediaProvider},
    http::AppState,
    media::{CloudinaryMediaStore, InMemoryMediaStore},
    persistence::PostgresUserStore,
};
use vidtube_core::{MediaStore, UserStore};
use vidtube_service::{AppService, configure_postgresql, tracing::init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = AppSettings::load()?;

    let pg_pool = configure_postgresql(&settings.postgres).await?;
    let user_store = PostgresUserStore::new(pg_pool);

    match settings.media.provider {
        MediaProvider::Cloudinary => {
            let cloudinary = settings
                .media
                .cloudinary
                .as_ref()
                .ok_or_else(|| eyre!("media.cloudinary settings are required"))?;
            let media_store = CloudinaryMediaStore::from_settings(cloudinary)?;
            serve(settings, user_store, media_store).await
        }
        MediaProvider::Memory => {
            tracing::warn!("Using the in-memory media store; uploads are not persisted");
            serve(settings, user_store, InMemoryMediaStore::new()).await
        }
    }
}

async fn serve<U, M>(settings: AppSettings, user_store: U, media_store: M) -> Result<()>
where
    U: UserStore + 'static,
    M: MediaStore + 'static,
{
    let state = AppState::new(
        user_store,
        media_store,
        JwtTokenIssuer::from_settings(&settings.auth),
        settings.application.environment.secure_cookies(),
    );

    let listener = tokio::net::TcpListener::bind(settings.application.address()).await?;

    AppService::new(state)
        .run_standalone(listener, Some(settings.application.allowed_origins))
        .await?;

    Ok(())
}
