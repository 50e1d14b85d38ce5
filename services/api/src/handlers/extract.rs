//! Request extractors shared by every handler.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use yamdb_auth_types::bearer::bearer_token;
use yamdb_auth_types::token::validate_access_token;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, or `None` for anonymous requests.
///
/// The user is reloaded from the store on every request, so role changes and
/// deletions take effect before the token expires. A bearer token that is
/// malformed, expired or names an unknown user is rejected with 401.
#[derive(Debug, Clone)]
pub struct Principal(pub Option<User>);

impl Principal {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    // Extract synchronously, then return a 'static future (see axum-core 0.5
    // `fn -> impl Future + Send` signature).
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(&parts.headers).map(|t| t.map(str::to_owned));
        let users = state.user_repo();
        let secret = state.secret_key.clone();

        async move {
            let Some(token) = token.map_err(|_| ApiError::InvalidToken)? else {
                return Ok(Self(None));
            };
            let info = validate_access_token(&token, &secret).map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                ApiError::InvalidToken
            })?;
            let user = users
                .find_by_id(info.user_id)
                .await?
                .ok_or(ApiError::InvalidToken)?;
            Ok(Self(Some(user)))
        }
    }
}

/// `axum::Json` with rejections rendered as validation errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with rejections rendered as 404.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParams<T>(pub T);

/// Parse a raw query string with `serde_qs`; an absent query yields `T::default()`.
pub fn parse_query<T>(raw_query: Option<&str>) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    Ok(raw_query
        .map(serde_qs::from_str::<T>)
        .transpose()
        .map_err(|e| ApiError::InvalidQuery(e.to_string()))?
        .unwrap_or_default())
}
