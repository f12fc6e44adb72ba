use cookie::{Cookie, SameSite};
use core_hh::DeployMode;

pub const COOKIE_NAME: &str = "token";

/// Create a session cookie carrying the token.
///
/// In production the frontend is served from a different site, so the cookie
/// must be Secure with SameSite=None; local development runs over plain http
/// and keeps SameSite=Strict.
pub fn create_session_cookie(token: &str, max_age_secs: u64, mode: DeployMode) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token.to_string()))
        .http_only(true)
        .secure(mode.is_production())
        .same_site(same_site_for(mode))
        .max_age(cookie::time::Duration::seconds(max_age_secs as i64))
        .path("/")
        .build()
}

/// Create a cookie to clear the session (for logout)
pub fn create_logout_cookie(mode: DeployMode) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .http_only(true)
        .secure(mode.is_production())
        .same_site(same_site_for(mode))
        .max_age(cookie::time::Duration::seconds(0))
        .path("/")
        .build()
}

/// Parse the session token from a Cookie header
pub fn parse_session_cookie(cookie_header: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| Cookie::parse(pair.trim()).ok())
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

fn same_site_for(mode: DeployMode) -> SameSite {
    if mode.is_production() {
        SameSite::None
    } else {
        SameSite::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_cookie_development() {
        let cookie = create_session_cookie("test_token", 3600, DeployMode::Development);
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.value(), "test_token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }

    #[test]
    fn test_create_session_cookie_production() {
        let cookie = create_session_cookie("test_token", 3600, DeployMode::Production);
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }

    #[test]
    fn test_create_logout_cookie_expires_immediately() {
        let cookie = create_logout_cookie(DeployMode::Development);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(cookie::time::Duration::seconds(0)));
    }

    #[test]
    fn test_parse_session_cookie() {
        let cookie_header = "token=abc123; Path=/; HttpOnly";
        assert_eq!(parse_session_cookie(cookie_header), Some("abc123".to_string()));
    }

    #[test]
    fn test_parse_session_cookie_multiple() {
        let cookie_header = "other=value; token=abc123; another=test";
        assert_eq!(parse_session_cookie(cookie_header), Some("abc123".to_string()));
    }

    #[test]
    fn test_parse_session_cookie_missing() {
        let cookie_header = "other=value; another=test";
        assert_eq!(parse_session_cookie(cookie_header), None);
    }
}
