use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::extract::JsonBody;
use crate::state::AppState;
use crate::usecase::auth::{SignupInput, SignupUseCase, TokenInput, TokenUseCase};

// ── POST /auth/signup/ ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub username: String,
    pub email: String,
}

pub async fn signup(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
        mailer: state.mailer(),
        secret: state.secret_key.clone(),
        mail_from: state.mail_from.clone(),
        public_host: state.public_host.clone(),
    };
    let out = usecase
        .execute(SignupInput {
            username: body.username,
            email: body.email,
        })
        .await?;
    Ok(Json(SignupResponse {
        username: out.username,
        email: out.email,
    }))
}

// ── POST /auth/token/ ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub confirmation_code: Option<String>,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn token(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let usecase = TokenUseCase {
        users: state.user_repo(),
        secret: state.secret_key.clone(),
    };
    let token = usecase
        .execute(TokenInput {
            username: body.username,
            confirmation_code: body.confirmation_code,
        })
        .await?;
    Ok(Json(TokenResponse { token }))
}
