pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    channel::{ChannelProfile, Video, VideoId, VideoOwner, WatchHistoryEntry},
    email::Email,
    full_name::FullName,
    media::{MediaAsset, MediaFile},
    password::{Password, PasswordHash},
    tokens::{AccessClaims, AccessToken, RefreshToken, TokenPair},
    user::{AccountDetails, CandidateProfile, NewUser, RegistrationRequest, User, UserProfile},
    user_error::UserError,
    user_id::UserId,
    username::Username,
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{
        CredentialVerifier, MediaStore, MediaStoreError, TokenError, TokenIssuer,
    },
};

pub use strategies::auth_validator::AuthValidator;
