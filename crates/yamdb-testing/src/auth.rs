//! Bearer credentials for integration tests.
//!
//! Tokens are signed with [`TEST_SECRET`]; the service under test must be
//! configured with the same key.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use yamdb_auth_types::token::issue_access_token;
use yamdb_domain::user::UserRole;

pub const TEST_SECRET: &str = "yamdb-test-secret-key";

/// Identity a test request is made as.
pub struct MockAuth {
    pub user_id: i32,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// A freshly signed access token.
    pub fn token(&self) -> String {
        issue_access_token(self.user_id, self.role.as_str(), TEST_SECRET)
            .expect("sign test token")
            .0
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}
