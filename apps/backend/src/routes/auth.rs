//! Identity middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, Result};
use crate::AppState;

/// Email set by the access proxy in front of the app.
pub const ACCESS_EMAIL_HEADER: &str = "cf-access-authenticated-user-email";
/// Display name set by the access proxy.
pub const ACCESS_NAME_HEADER: &str = "cf-access-authenticated-user-name";
/// Shared PIN for access without the proxy.
pub const PIN_HEADER: &str = "x-radres-pin";
/// Identity assigned to PIN holders.
pub const EMERGENCY_EMAIL: &str = "resident@emergency.local";

/// Authenticated user stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub email: String,
}

pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Proxy email wins; otherwise a matching PIN maps to the emergency identity.
pub fn resolve_email(headers: &HeaderMap, pin: &str) -> Option<String> {
    if let Some(email) = header_str(headers, ACCESS_EMAIL_HEADER) {
        return Some(email.to_string());
    }
    match header_str(headers, PIN_HEADER) {
        Some(given) if given == pin => Some(EMERGENCY_EMAIL.to_string()),
        _ => None,
    }
}

/// Auth middleware - resolves the caller's identity from request headers
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let email = resolve_email(request.headers(), &state.config.emergency_pin)
        .ok_or_else(|| ApiError::Unauthorized("Missing identity".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser { email });

    Ok(next.run(request).await)
}
