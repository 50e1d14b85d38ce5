//! `categories/` and `genres/` share request/response shapes and behavior.

use axum::{
    Json,
    extract::{OriginalUri, RawQuery, State},
    http::{HeaderMap, StatusCode, Uri},
};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::{Page, PageQuery};

use crate::domain::repository::TaxonomyRepository;
use crate::domain::types::{TaxonomyEntry, User};
use crate::error::ApiError;
use crate::handlers::extract::{JsonBody, PathParams, Principal, parse_query};
use crate::handlers::pagination::paginate;
use crate::state::AppState;
use crate::usecase::taxonomy::{
    CreateTaxonomyInput, CreateTaxonomyUseCase, DeleteTaxonomyUseCase, ListTaxonomyUseCase,
};

#[derive(Serialize)]
pub struct TaxonomyResponse {
    pub name: String,
    pub slug: String,
}

impl From<TaxonomyEntry> for TaxonomyResponse {
    fn from(e: TaxonomyEntry) -> Self {
        Self {
            name: e.name,
            slug: e.slug,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct TaxonomyListQuery {
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub offset: Option<i64>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct TaxonomyRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

async fn list<R: TaxonomyRepository>(
    repo: R,
    raw_query: Option<&str>,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<Json<Page<TaxonomyResponse>>, ApiError> {
    let query: TaxonomyListQuery = parse_query(raw_query)?;
    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .clamped();
    let listing = ListTaxonomyUseCase { repo }
        .execute(query.search.as_deref(), page)
        .await?;
    Ok(Json(paginate(listing, page, headers, uri, TaxonomyResponse::from)))
}

async fn create<R: TaxonomyRepository>(
    repo: R,
    principal: Option<&User>,
    body: TaxonomyRequest,
) -> Result<(StatusCode, Json<TaxonomyResponse>), ApiError> {
    let entry = CreateTaxonomyUseCase { repo }
        .execute(
            principal,
            CreateTaxonomyInput {
                name: body.name,
                slug: body.slug,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

async fn delete<R: TaxonomyRepository>(
    repo: R,
    principal: Option<&User>,
    slug: &str,
) -> Result<StatusCode, ApiError> {
    DeleteTaxonomyUseCase { repo }
        .execute(principal, slug)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── /categories/ ─────────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<TaxonomyResponse>>, ApiError> {
    list(state.category_repo(), raw_query.as_deref(), &headers, &uri).await
}

pub async fn create_category(
    principal: Principal,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TaxonomyRequest>,
) -> Result<(StatusCode, Json<TaxonomyResponse>), ApiError> {
    create(state.category_repo(), principal.user(), body).await
}

pub async fn delete_category(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(slug): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    delete(state.category_repo(), principal.user(), &slug).await
}

// ── /genres/ ─────────────────────────────────────────────────────────────────

pub async fn list_genres(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<TaxonomyResponse>>, ApiError> {
    list(state.genre_repo(), raw_query.as_deref(), &headers, &uri).await
}

pub async fn create_genre(
    principal: Principal,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TaxonomyRequest>,
) -> Result<(StatusCode, Json<TaxonomyResponse>), ApiError> {
    create(state.genre_repo(), principal.user(), body).await
}

pub async fn delete_genre(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(slug): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    delete(state.genre_repo(), principal.user(), &slug).await
}
