use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use vidtube_core::TokenPair;

use crate::config::{ACCESS_TOKEN_COOKIE_NAME, REFRESH_TOKEN_COOKIE_NAME};

// Create cookie and set the value to the passed-in token string
pub fn create_session_cookie(name: &'static str, token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

pub fn create_removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = create_session_cookie(name, String::new(), secure);
    cookie.make_removal();
    cookie
}

pub fn with_session_cookies(jar: CookieJar, tokens: &TokenPair, secure: bool) -> CookieJar {
    jar.add(create_session_cookie(
        ACCESS_TOKEN_COOKIE_NAME,
        tokens.access_token.as_str().to_owned(),
        secure,
    ))
    .add(create_session_cookie(
        REFRESH_TOKEN_COOKIE_NAME,
        tokens.refresh_token.as_str().to_owned(),
        secure,
    ))
}

pub fn without_session_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(create_removal_cookie(ACCESS_TOKEN_COOKIE_NAME, secure))
        .add(create_removal_cookie(REFRESH_TOKEN_COOKIE_NAME, secure))
}
