use axum::{
    Json,
    extract::{OriginalUri, RawQuery, State},
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::{Page, PageQuery};

use crate::domain::types::{Title, TitleFilter};
use crate::error::ApiError;
use crate::handlers::extract::{JsonBody, PathParams, Principal, parse_query};
use crate::handlers::pagination::paginate;
use crate::handlers::taxonomy::TaxonomyResponse;
use crate::state::AppState;
use crate::usecase::title::{
    CreateTitleUseCase, DeleteTitleUseCase, GetTitleUseCase, ListTitlesUseCase, TitleInput,
    UpdateTitleUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Read shape: nested category and genres plus the aggregate rating.
#[derive(Serialize)]
pub struct TitleResponse {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub rating: f64,
    pub description: Option<String>,
    pub genre: Vec<TaxonomyResponse>,
    pub category: Option<TaxonomyResponse>,
}

impl From<Title> for TitleResponse {
    fn from(t: Title) -> Self {
        Self {
            id: t.id,
            name: t.name,
            year: t.year,
            rating: t.rating,
            description: t.description,
            genre: t.genres.into_iter().map(Into::into).collect(),
            category: t.category.map(Into::into),
        }
    }
}

/// Write shape: relations echoed back as slugs.
#[derive(Serialize)]
pub struct TitleWriteResponse {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub genre: Vec<String>,
    pub category: Option<String>,
}

impl From<Title> for TitleWriteResponse {
    fn from(t: Title) -> Self {
        Self {
            id: t.id,
            name: t.name,
            year: t.year,
            description: t.description,
            genre: t.genres.into_iter().map(|g| g.slug).collect(),
            category: t.category.map(|c| c.slug),
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct TitleListQuery {
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub offset: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "yamdb_core::serde::empty_as_none")]
    pub year: Option<i32>,
}

#[derive(Deserialize)]
pub struct TitleRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "yamdb_core::serde::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "yamdb_core::serde::double_option")]
    pub category: Option<Option<String>>,
    pub genre: Option<Vec<String>>,
}

impl From<TitleRequest> for TitleInput {
    fn from(r: TitleRequest) -> Self {
        Self {
            name: r.name,
            year: r.year,
            description: r.description,
            category: r.category,
            genre: r.genre,
        }
    }
}

// ── GET /titles/ ─────────────────────────────────────────────────────────────

pub async fn list_titles(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<TitleResponse>>, ApiError> {
    let query: TitleListQuery = parse_query(raw_query.as_deref())?;
    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .clamped();
    let filter = TitleFilter {
        name: query.name,
        category: query.category,
        genre: query.genre,
        year: query.year,
    };

    let usecase = ListTitlesUseCase {
        titles: state.title_repo(),
    };
    let listing = usecase.execute(&filter, page).await?;
    Ok(Json(paginate(listing, page, &headers, &uri, TitleResponse::from)))
}

// ── POST /titles/ ────────────────────────────────────────────────────────────

pub async fn create_title(
    principal: Principal,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TitleRequest>,
) -> Result<(StatusCode, Json<TitleWriteResponse>), ApiError> {
    let usecase = CreateTitleUseCase {
        titles: state.title_repo(),
        categories: state.category_repo(),
        genres: state.genre_repo(),
    };
    let title = usecase.execute(principal.user(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(title.into())))
}

// ── GET /titles/{title_id}/ ──────────────────────────────────────────────────

pub async fn get_title(
    State(state): State<AppState>,
    PathParams(title_id): PathParams<i32>,
) -> Result<Json<TitleResponse>, ApiError> {
    let usecase = GetTitleUseCase {
        titles: state.title_repo(),
    };
    let title = usecase.execute(title_id).await?;
    Ok(Json(title.into()))
}

// ── PATCH /titles/{title_id}/ ────────────────────────────────────────────────

pub async fn update_title(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(title_id): PathParams<i32>,
    JsonBody(body): JsonBody<TitleRequest>,
) -> Result<Json<TitleWriteResponse>, ApiError> {
    let usecase = UpdateTitleUseCase {
        titles: state.title_repo(),
        categories: state.category_repo(),
        genres: state.genre_repo(),
    };
    let title = usecase
        .execute(principal.user(), title_id, body.into())
        .await?;
    Ok(Json(title.into()))
}

// ── DELETE /titles/{title_id}/ ───────────────────────────────────────────────

pub async fn delete_title(
    principal: Principal,
    State(state): State<AppState>,
    PathParams(title_id): PathParams<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteTitleUseCase {
        titles: state.title_repo(),
    };
    usecase.execute(principal.user(), title_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
