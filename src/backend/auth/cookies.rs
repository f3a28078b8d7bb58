/**
 * Session Cookies
 *
 * Reading the session cookie from a request's cookie jar and building the
 * cookie that hands a new session id to the client. Parsing and
 * serialization go through `axum-extra`'s `CookieJar`, so values are
 * percent-decoded and stripped of surrounding quotes on the way in and
 * encoded on the way out.
 */

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Cookie name used by the user service routes
pub const SESSION_COOKIE: &str = "session_id";

/// Value of the cookie `name`, if the request carries one
pub fn read_cookie(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value_trimmed().to_string())
}

/// Cookie carrying a session id, scoped to the whole site and hidden from
/// scripts
pub fn session_cookie(name: impl Into<String>, session_id: impl Into<String>) -> Cookie<'static> {
    Cookie::build((name.into(), session_id.into()))
        .path("/")
        .http_only(true)
        .build()
}
