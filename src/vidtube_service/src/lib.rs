mod app_service;
mod helpers;
pub mod tracing;

pub use app_service::AppService;
pub use helpers::{configure_postgresql, get_postgres_pool};
