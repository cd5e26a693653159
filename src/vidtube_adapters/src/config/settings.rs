use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use super::constants::{defaults, env, prod};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete service configuration.
///
/// Sources, later ones overriding earlier ones: built-in defaults, an optional
/// `configuration.json` in the working directory, then `VIDTUBE_*` environment
/// variables with `__` between nested keys (`VIDTUBE_AUTH__ACCESS_TOKEN__SECRET`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub postgres: PostgresSettings,
    pub media: MediaSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub allowed_origins: AllowedOrigins,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    /// Session cookies carry the `Secure` attribute only in production.
    pub fn secure_cookies(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub access_token: TokenSettings,
    pub refresh_token: TokenSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub secret: Secret<String>,
    /// Seconds.
    pub time_to_live: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaProvider {
    Cloudinary,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    pub provider: MediaProvider,
    pub cloudinary: Option<CloudinarySettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudinarySettings {
    #[serde(default = "default_cloudinary_base_url")]
    pub base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Secret<String>,
    #[serde(default = "default_cloudinary_timeout_ms")]
    pub timeout_ms: u64,
}

impl CloudinarySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_cloudinary_base_url() -> String {
    prod::media_store::CLOUDINARY_BASE_URL.to_string()
}

fn default_cloudinary_timeout_ms() -> u64 {
    prod::media_store::TIMEOUT.as_millis() as u64
}

/// CORS origins allowed to call the API with credentials.
///
/// Deserializes from a list or from a single comma-separated string, the
/// latter being what an environment variable provides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawOrigins")]
pub struct AllowedOrigins(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOrigins {
    List(Vec<String>),
    Csv(String),
}

impl From<RawOrigins> for AllowedOrigins {
    fn from(raw: RawOrigins) -> Self {
        let origins = match raw {
            RawOrigins::List(list) => list,
            RawOrigins::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };

        Self(
            origins
                .into_iter()
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        )
    }
}

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        RawOrigins::List(origins).into()
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed.as_bytes() == origin.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AppSettings {
    /// Loads `.env`, then the layered sources, then validates the result.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("application.host", defaults::HOST)?
            .set_default("application.port", i64::from(defaults::PORT))?
            .set_default("application.environment", "local")?
            .set_default("application.allowed_origins", "")?
            .set_default(
                "auth.access_token.time_to_live",
                defaults::ACCESS_TOKEN_TTL_SECONDS,
            )?
            .set_default(
                "auth.refresh_token.time_to_live",
                defaults::REFRESH_TOKEN_TTL_SECONDS,
            )?
            .set_default(
                "postgres.max_connections",
                i64::from(defaults::POSTGRES_MAX_CONNECTIONS),
            )?
            .set_default("media.provider", "memory")?
            .add_source(config::File::with_name(env::CONFIG_FILE_NAME).required(false))
            .add_source(
                config::Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let access = &self.auth.access_token;
        let refresh = &self.auth.refresh_token;

        if access.secret.expose_secret().trim().is_empty() {
            return Err(SettingsError::Invalid(
                "access token secret must not be blank".to_string(),
            ));
        }
        if refresh.secret.expose_secret().trim().is_empty() {
            return Err(SettingsError::Invalid(
                "refresh token secret must not be blank".to_string(),
            ));
        }
        if access.secret.expose_secret() == refresh.secret.expose_secret() {
            return Err(SettingsError::Invalid(
                "access and refresh token secrets must differ".to_string(),
            ));
        }
        if access.time_to_live <= 0 || refresh.time_to_live <= 0 {
            return Err(SettingsError::Invalid(
                "token time to live must be positive".to_string(),
            ));
        }
        if self.media.provider == MediaProvider::Cloudinary && self.media.cloudinary.is_none() {
            return Err(SettingsError::Invalid(
                "cloudinary provider selected without cloudinary settings".to_string(),
            ));
        }

        Ok(())
    }
}
