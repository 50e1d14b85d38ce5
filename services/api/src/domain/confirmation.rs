//! Signup confirmation codes.
//!
//! A code is a signed token bound to the user id and the user's current
//! `confirmation_version`. Exchanging a code bumps the version, so a code
//! can be used once and every older code stops working with it.

use serde::{Deserialize, Serialize};
use yamdb_auth_types::token::{AuthError, TokenType, now_secs, sign, verify};

use crate::domain::types::User;

/// Confirmation-code lifetime in seconds (3 days).
pub const CONFIRMATION_CODE_EXP: u64 = 3 * 24 * 3600;

#[derive(Debug, Serialize, Deserialize)]
struct ConfirmationClaims {
    sub: String,
    ver: i32,
    exp: u64,
    token_type: TokenType,
}

pub fn issue_confirmation_code(user: &User, secret: &str) -> Result<String, AuthError> {
    let claims = ConfirmationClaims {
        sub: user.id.to_string(),
        ver: user.confirmation_version,
        exp: now_secs() + CONFIRMATION_CODE_EXP,
        token_type: TokenType::Confirmation,
    };
    sign(&claims, secret)
}

/// `true` when `code` was issued for this user at its current version and has
/// not expired.
pub fn check_confirmation_code(user: &User, code: &str, secret: &str) -> bool {
    let Ok(claims) = verify::<ConfirmationClaims>(code, secret) else {
        return false;
    };
    claims.token_type == TokenType::Confirmation
        && claims.sub == user.id.to_string()
        && claims.ver == user.confirmation_version
}
