//! `Authorization: Bearer <token>` header parsing.

use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::token::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from request headers.
///
/// Returns `Ok(None)` when no `Authorization` header is present, so that
/// anonymous requests can still reach read-only routes. A header that is
/// present but not a well-formed bearer credential is an error.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::Malformed)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::Malformed)?;
    Ok(Some(token))
}
