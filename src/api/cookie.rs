// src/api/cookie.rs — Session cookie issuance and request header helpers

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

pub const SESSION_COOKIE: &str = "session";

/// How issued session cookies are scoped.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub max_age_secs: u64,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            max_age_secs: 24 * 60 * 60,
            secure: false,
        }
    }
}

impl CookieSettings {
    /// `Set-Cookie` value for a fresh session token.
    pub fn set_cookie_value(&self, token: &str) -> String {
        let mut value = format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
            self.max_age_secs
        );
        if self.secure {
            value.push_str("; Secure");
        }
        value
    }
}

/// Value of the `session` cookie, if the request carries a non-empty one.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Caller IP from proxy headers: first `X-Forwarded-For` entry, then `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next().map(str::trim) {
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }
    header_str(headers, "x-real-ip").map(str::to_string)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Middleware: give cookieless clients a random session token.
///
/// The request itself is passed through untouched, so the handler still sees
/// no cookie; the browser presents it from the next request on.
pub async fn issue_session_cookie(
    State(settings): State<CookieSettings>,
    request: Request,
    next: Next,
) -> Response {
    let has_cookie = session_cookie(request.headers()).is_some();
    let mut response = next.run(request).await;

    if !has_cookie {
        let token = uuid::Uuid::new_v4().to_string();
        match HeaderValue::from_str(&settings.set_cookie_value(&token)) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
                tracing::debug!("Issued new session cookie");
            }
            Err(e) => tracing::warn!("Could not build session cookie header: {e}"),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_session_cookie_found_among_others() {
        let h = headers(&[("cookie", "theme=dark; session=abc-123; lang=en")]);
        assert_eq!(session_cookie(&h).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_session_cookie_across_multiple_headers() {
        let h = headers(&[("cookie", "theme=dark"), ("cookie", "session=xyz")]);
        assert_eq!(session_cookie(&h).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_session_cookie_missing_or_empty() {
        assert!(session_cookie(&HeaderMap::new()).is_none());
        assert!(session_cookie(&headers(&[("cookie", "session=")])).is_none());
        assert!(session_cookie(&headers(&[("cookie", "sessionx=1")])).is_none());
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let h = headers(&[
            ("x-forwarded-for", " 203.0.113.7 , 10.0.0.1"),
            ("x-real-ip", "10.0.0.2"),
        ]);
        assert_eq!(client_ip(&h).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip() {
        let h = headers(&[("x-real-ip", " 10.0.0.2 ")]);
        assert_eq!(client_ip(&h).as_deref(), Some("10.0.0.2"));
        assert!(client_ip(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_set_cookie_value() {
        let settings = CookieSettings::default();
        assert_eq!(
            settings.set_cookie_value("t"),
            "session=t; Path=/; HttpOnly; SameSite=Strict; Max-Age=86400"
        );
        let secure = CookieSettings {
            secure: true,
            ..CookieSettings::default()
        };
        assert!(secure.set_cookie_value("t").ends_with("; Secure"));
    }
}
