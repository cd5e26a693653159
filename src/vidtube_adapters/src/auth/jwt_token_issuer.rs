use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;
use vidtube_core::{
    AccessClaims, AccessToken, RefreshToken, TokenError, TokenIssuer, UserId, UserProfile,
};

use crate::config::{AuthSettings, TokenSettings};

#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Secret<String>,
    /// Seconds.
    pub time_to_live: i64,
}

impl TokenConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

impl From<&TokenSettings> for TokenConfig {
    fn from(settings: &TokenSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            time_to_live: settings.time_to_live,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    sub: UserId,
    jti: String,
    iat: i64,
    exp: i64,
}

/// HS256 token issuer. Access and refresh tokens are signed with separate
/// secrets, so neither kind verifies as the other.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    access: TokenConfig,
    refresh: TokenConfig,
}

impl JwtTokenIssuer {
    pub fn new(access: TokenConfig, refresh: TokenConfig) -> Self {
        Self { access, refresh }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            TokenConfig::from(&settings.access_token),
            TokenConfig::from(&settings.refresh_token),
        )
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_access_token(&self, user: &UserProfile) -> Result<AccessToken, TokenError> {
        let (iat, exp) = issued_and_expiry(self.access.time_to_live)?;
        let claims = AccessClaims {
            sub: user.id,
            email: user.email.as_str().to_string(),
            username: user.username.as_str().to_string(),
            full_name: user.full_name.as_str().to_string(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp,
        };

        create_token(&claims, self.access.as_bytes()).map(AccessToken::new)
    }

    fn issue_refresh_token(&self, user_id: &UserId) -> Result<RefreshToken, TokenError> {
        let (iat, exp) = issued_and_expiry(self.refresh.time_to_live)?;
        let claims = RefreshClaims {
            sub: *user_id,
            jti: Uuid::new_v4().to_string(),
            iat,
            exp,
        };

        create_token(&claims, self.refresh.as_bytes()).map(RefreshToken::new)
    }

    fn verify_refresh_token(&self, token: &RefreshToken) -> Result<UserId, TokenError> {
        decode_token::<RefreshClaims>(token.as_str(), self.refresh.as_bytes()).map(|c| c.sub)
    }

    fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode_token::<AccessClaims>(token, self.access.as_bytes())
    }
}

fn issued_and_expiry(time_to_live: i64) -> Result<(i64, i64), TokenError> {
    let delta = chrono::Duration::try_seconds(time_to_live).ok_or(TokenError::Unexpected(
        "Failed to create token duration".to_string(),
    ))?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or(TokenError::Unexpected("Duration out of range".to_string()))?;

    Ok((now.timestamp(), exp.timestamp()))
}

fn create_token<T: Serialize>(claims: &T, secret: &[u8]) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Unexpected(e.to_string()))
}

// Signature and expiry are checked with zero leeway.
fn decode_token<T: DeserializeOwned>(token: &str, secret: &[u8]) -> Result<T, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<T>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            TokenError::Invalid
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidtube_core::{Email, FullName, MediaAsset, Username};

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(
            TokenConfig {
                secret: Secret::from("access-secret".to_owned()),
                time_to_live: 900,
            },
            TokenConfig {
                secret: Secret::from("refresh-secret".to_owned()),
                time_to_live: 864_000,
            },
        )
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new(),
            username: Username::parse("alice").unwrap(),
            email: Email::parse("alice@example.com").unwrap(),
            full_name: FullName::parse("Alice Liddell").unwrap(),
            avatar: MediaAsset {
                url: "https://media.test/a".to_string(),
                asset_id: "a".to_string(),
            },
            cover_image: None,
            watch_history: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_access_token_carries_profile_claims() {
        let issuer = issuer();
        let profile = profile();

        let token = issuer.issue_access_token(&profile).unwrap();
        let claims = issuer.verify_access_token(token.as_str()).unwrap();

        assert_eq!(token.as_str().split('.').count(), 3);
        assert_eq!(claims.sub, profile.id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.full_name, "Alice Liddell");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_round_trip_yields_user_id() {
        let issuer = issuer();
        let id = UserId::new();

        let token = issuer.issue_refresh_token(&id).unwrap();

        assert_eq!(issuer.verify_refresh_token(&token).unwrap(), id);
    }

    #[test]
    fn test_tokens_minted_together_differ() {
        let issuer = issuer();
        let id = UserId::new();

        let first = issuer.issue_refresh_token(&id).unwrap();
        let second = issuer.issue_refresh_token(&id).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_token_kinds_do_not_cross_verify() {
        let issuer = issuer();
        let profile = profile();

        let access = issuer.issue_access_token(&profile).unwrap();
        let refresh = issuer.issue_refresh_token(&profile.id).unwrap();

        assert_eq!(
            issuer.verify_refresh_token(&RefreshToken::new(access.into_string())),
            Err(TokenError::Invalid)
        );
        assert_eq!(
            issuer.verify_access_token(refresh.as_str()).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_expired_refresh_token_is_invalid() {
        let issuer = issuer();
        let now = Utc::now().timestamp();
        let claims = RefreshClaims {
            sub: UserId::new(),
            jti: Uuid::new_v4().to_string(),
            iat: now - 120,
            exp: now - 60,
        };
        let token = create_token(&claims, b"refresh-secret").unwrap();

        assert_eq!(
            issuer.verify_refresh_token(&RefreshToken::new(token)),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let issuer = issuer();
        let token = issuer.issue_refresh_token(&UserId::new()).unwrap();
        let tampered = format!("{}x", token.as_str());

        assert_eq!(
            issuer.verify_refresh_token(&RefreshToken::new(tampered)),
            Err(TokenError::Invalid)
        );
    }
}
