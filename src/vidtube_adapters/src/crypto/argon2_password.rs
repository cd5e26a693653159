use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use vidtube_core::{CredentialVerifier, Password, PasswordHash};

fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(password: Password) -> Result<PasswordHash, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| PasswordHash::new(Secret::new(h.to_string())))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected_password_hash: PasswordHash,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected = password_hash::PasswordHash::new(
                expected_password_hash.as_ref().expose_secret(),
            )
            .map_err(|e| e.to_string())?;

            hasher()?
                .verify_password(
                    password_candidate.as_ref().expose_secret().as_bytes(),
                    &expected,
                )
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

/// Argon2id password check. Every failure, including a malformed stored hash,
/// is a mismatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialVerifier;

#[async_trait]
impl CredentialVerifier for Argon2CredentialVerifier {
    #[tracing::instrument(name = "Argon2CredentialVerifier::verify", skip_all)]
    async fn verify(&self, candidate: &Password, hash: &PasswordHash) -> bool {
        match verify_password_hash(hash.clone(), candidate.clone()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Password verification failed");
                false
            }
        }
    }
}
