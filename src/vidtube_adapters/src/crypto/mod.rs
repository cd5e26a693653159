pub mod argon2_password;

pub use argon2_password::{Argon2CredentialVerifier, compute_password_hash, verify_password_hash};
