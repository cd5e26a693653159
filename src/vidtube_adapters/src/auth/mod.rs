pub mod access_token_validator;
pub mod cookies;
pub mod jwt_token_issuer;

pub use access_token_validator::{AccessTokenValidator, TokenAuthError, extract_access_token};
pub use cookies::{
    create_removal_cookie, create_session_cookie, with_session_cookies, without_session_cookies,
};
pub use jwt_token_issuer::{JwtTokenIssuer, TokenConfig};
