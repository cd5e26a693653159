pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AppSettings, ApplicationSettings, AuthSettings, CloudinarySettings,
    Environment, MediaProvider, MediaSettings, PostgresSettings, SettingsError, TokenSettings,
};
