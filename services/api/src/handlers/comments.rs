use axum::{
    Json,
    extract::{OriginalUri, RawQuery, State},
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::{Page, PageQuery};

use crate::domain::types::Comment;
use crate::error::ApiError;
use crate::handlers::extract::{JsonBody, PathParams, Principal, parse_query};
use crate::handlers::pagination::paginate;
use crate::state::AppState;
use crate::usecase::comment::{
    CreateCommentUseCase, DeleteCommentUseCase, GetCommentUseCase, ListCommentsUseCase,
    UpdateCommentUseCase,
};

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: i32,
    /// Text of the parent review.
    pub review: String,
    pub author: String,
    pub text: String,
    #[serde(serialize_with = "yamdb_core::serde::to_rfc3339_ms")]
    pub pub_date: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            review: c.review_text,
            author: c.author_username,
            text: c.text,
            pub_date: c.pub_date,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct CommentListQuery {
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub offset: Option<i64>,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

// ── GET /titles/{title_id}/reviews/{review_id}/comments/ ─────────────────────

pub async fn list_comments(
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(i32, i32)>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<CommentResponse>>, ApiError> {
    let query: CommentListQuery = parse_query(raw_query.as_deref())?;
    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .clamped();
    let usecase = ListCommentsUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let listing = usecase.execute(title_id, review_id, page).await?;
    Ok(Json(paginate(listing, page, &headers, &uri, CommentResponse::from)))
}

// ── POST /titles/{title_id}/reviews/{review_id}/comments/ ────────────────────

pub async fn create_comment(
    principal: Principal,
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(i32, i32)>,
    JsonBody(body): JsonBody<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let usecase = CreateCommentUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase
        .execute(principal.user(), title_id, review_id, body.text)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── GET /titles/{title_id}/reviews/{review_id}/comments/{comment_id}/ ────────

pub async fn get_comment(
    State(state): State<AppState>,
    PathParams((title_id, review_id, comment_id)): PathParams<(i32, i32, i32)>,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = GetCommentUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase.execute(title_id, review_id, comment_id).await?;
    Ok(Json(comment.into()))
}

// ── PATCH /titles/{title_id}/reviews/{review_id}/comments/{comment_id}/ ──────

pub async fn update_comment(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(ids): PathParams<(i32, i32, i32)>,
    JsonBody(body): JsonBody<CommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = UpdateCommentUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase.execute(principal.user(), ids, body.text).await?;
    Ok(Json(comment.into()))
}

// ── DELETE /titles/{title_id}/reviews/{review_id}/comments/{comment_id}/ ─────

pub async fn delete_comment(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(ids): PathParams<(i32, i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteCommentUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    usecase.execute(principal.user(), ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
