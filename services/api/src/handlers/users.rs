use axum::{
    Json,
    extract::{OriginalUri, RawQuery, State},
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::{Page, PageQuery};

use crate::domain::types::User;
use crate::error::ApiError;
use crate::handlers::extract::{JsonBody, PathParams, Principal, parse_query};
use crate::handlers::pagination::paginate;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserUseCase, DeleteUserUseCase, GetMeUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateMeUseCase, UpdateUserUseCase, UserInput,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            bio: u.bio,
            role: u.role.as_str().to_owned(),
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UserListQuery {
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub offset: Option<i64>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct UserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

impl From<UserRequest> for UserInput {
    fn from(r: UserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
            bio: r.bio,
            role: r.role,
        }
    }
}

// ── GET /users/ ──────────────────────────────────────────────────────────────

pub async fn list_users(
    principal: Principal,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<UserResponse>>, ApiError> {
    let query: UserListQuery = parse_query(raw_query.as_deref())?;
    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .clamped();

    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let listing = usecase
        .execute(principal.user(), query.search.as_deref(), page)
        .await?;
    Ok(Json(paginate(listing, page, &headers, &uri, UserResponse::from)))
}

// ── POST /users/ ─────────────────────────────────────────────────────────────

pub async fn create_user(
    principal: Principal,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(principal.user(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/{username}/ ───────────────────────────────────────────────────

pub async fn get_user(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(username): PathParams<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(principal.user(), &username).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/{username}/ ─────────────────────────────────────────────────

pub async fn update_user(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(username): PathParams<String>,
    JsonBody(body): JsonBody<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(principal.user(), &username, body.into())
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{username}/ ────────────────────────────────────────────────

pub async fn delete_user(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(username): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(principal.user(), &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/me/ ───────────────────────────────────────────────────────────

pub async fn get_me(principal: Principal) -> Result<Json<UserResponse>, ApiError> {
    let me = GetMeUseCase::execute(principal.user())?;
    Ok(Json(me.into()))
}

// ── PATCH /users/me/ ─────────────────────────────────────────────────────────

pub async fn update_me(
    principal: Principal,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateMeUseCase {
        users: state.user_repo(),
    };
    let me = usecase.execute(principal.user(), body.into()).await?;
    Ok(Json(me.into()))
}
