use axum::{
    Json,
    extract::{OriginalUri, RawQuery, State},
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::{Page, PageQuery};

use crate::domain::types::Review;
use crate::error::ApiError;
use crate::handlers::extract::{JsonBody, PathParams, Principal, parse_query};
use crate::handlers::pagination::paginate;
use crate::state::AppState;
use crate::usecase::review::{
    CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase, ListReviewsUseCase, ReviewInput,
    UpdateReviewUseCase,
};

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: i32,
    /// Title name.
    pub title: String,
    /// Author username.
    pub author: String,
    pub text: String,
    pub score: i32,
    #[serde(serialize_with = "yamdb_core::serde::to_rfc3339_ms")]
    pub pub_date: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            title: r.title_name,
            author: r.author_username,
            text: r.text,
            score: r.score,
            pub_date: r.pub_date,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct ReviewListQuery {
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub offset: Option<i64>,
}

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub text: Option<String>,
    pub score: Option<i32>,
}

impl From<ReviewRequest> for ReviewInput {
    fn from(r: ReviewRequest) -> Self {
        Self {
            text: r.text,
            score: r.score,
        }
    }
}

// ── GET /titles/{title_id}/reviews/ ──────────────────────────────────────────

pub async fn list_reviews(
    State(state): State<AppState>,
    PathParams(title_id): PathParams<i32>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<ReviewResponse>>, ApiError> {
    let query: ReviewListQuery = parse_query(raw_query.as_deref())?;
    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .clamped();
    let usecase = ListReviewsUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let listing = usecase.execute(title_id, page).await?;
    Ok(Json(paginate(listing, page, &headers, &uri, ReviewResponse::from)))
}

// ── POST /titles/{title_id}/reviews/ ─────────────────────────────────────────

pub async fn create_review(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(title_id): PathParams<i32>,
    JsonBody(body): JsonBody<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let usecase = CreateReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase
        .execute(principal.user(), title_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── GET /titles/{title_id}/reviews/{review_id}/ ──────────────────────────────

pub async fn get_review(
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(i32, i32)>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = GetReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase.execute(title_id, review_id).await?;
    Ok(Json(review.into()))
}

// ── PATCH /titles/{title_id}/reviews/{review_id}/ ────────────────────────────

pub async fn update_review(
    principal: Principal,
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(i32, i32)>,
    JsonBody(body): JsonBody<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = UpdateReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase
        .execute(principal.user(), title_id, review_id, body.into())
        .await?;
    Ok(Json(review.into()))
}

// ── DELETE /titles/{title_id}/reviews/{review_id}/ ───────────────────────────

pub async fn delete_review(
    principal: Principal,
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    usecase
        .execute(principal.user(), title_id, review_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
