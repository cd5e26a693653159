//! # VidTube - user accounts for a video platform
//!
//! Facade crate that re-exports the public APIs of the VidTube components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Username`, `Password`, `UserProfile`, etc.
//! - **Ports**: `UserStore`, `MediaStore`, `TokenIssuer`, `CredentialVerifier`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RefreshUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `CloudinaryMediaStore`, `JwtTokenIssuer`, etc.
//! - **Service**: `AppService`, the router serving `/api/v1/users`

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use vidtube_core::*;
}

pub use vidtube_core::{
    AccessClaims, AccessToken, ChannelProfile, Email, FullName, MediaAsset, MediaFile, Password,
    RefreshToken, TokenPair, User, UserError, UserId, UserProfile, Username, WatchHistoryEntry,
};

// ============================================================================
// Ports
// ============================================================================

pub use vidtube_core::{
    CredentialVerifier, MediaStore, MediaStoreError, TokenError, TokenIssuer, UserStore,
    UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use vidtube_application::*;
}

pub use vidtube_application::{
    ChangePasswordUseCase, ChannelProfileUseCase, CurrentUserUseCase, DeleteAccountUseCase,
    LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterUseCase, SessionManager,
    UpdateAccountUseCase, UpdateMediaUseCase, WatchHistoryUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use vidtube_adapters::{auth, config, crypto, http, media, persistence};
}

pub use vidtube_adapters::{
    auth::JwtTokenIssuer,
    config::AppSettings,
    media::{CloudinaryMediaStore, InMemoryMediaStore},
    persistence::{HashMapUserStore, PostgresUserStore},
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use vidtube_service::{AppService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
