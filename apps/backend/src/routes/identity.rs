//! Identity endpoint

use axum::{http::HeaderMap, Json};

use crate::models::IdentityResponse;
use crate::routes::auth::{header_str, ACCESS_EMAIL_HEADER, ACCESS_NAME_HEADER};

/// GET /api/identity
///
/// Reports the access-proxy identity without requiring one.
pub async fn identity(headers: HeaderMap) -> Json<IdentityResponse> {
    let Some(email) = header_str(&headers, ACCESS_EMAIL_HEADER) else {
        return Json(IdentityResponse {
            authenticated: false,
            email: "Doctor".to_string(),
            name: None,
            short_name: None,
        });
    };

    let name = header_str(&headers, ACCESS_NAME_HEADER).unwrap_or("Doctor");
    let short_name = email.split('@').next().unwrap_or(email);

    Json(IdentityResponse {
        authenticated: true,
        email: email.to_string(),
        name: Some(name.to_string()),
        short_name: Some(short_name.to_string()),
    })
}
