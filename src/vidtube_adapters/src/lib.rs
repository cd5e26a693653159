pub mod auth;
pub mod config;
pub mod crypto;
pub mod http;
pub mod media;
pub mod persistence;
