use chrono::{Datelike, Utc};
use yamdb_core::error::FieldErrors;
use yamdb_domain::pagination::PageRequest;

use crate::domain::policy::{Action, Resource, authorize};
use crate::domain::repository::{TaxonomyRepository, TitleRepository};
use crate::domain::types::{Listing, Title, TitleFilter, TitlePatch, TitleWrite, User};
use crate::domain::validation::{REQUIRED, not_blank, validate_year};
use crate::error::ApiError;

/// Title fields as submitted.
///
/// `description` and `category` distinguish absent (`None`) from an explicit
/// `null` (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct TitleInput {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub genre: Option<Vec<String>>,
}

fn missing_slug(slug: &str) -> String {
    format!("Object with slug={slug} does not exist.")
}

/// Validates scalar fields and resolves category/genre slugs to ids.
struct TitleResolver<'a, C, G> {
    categories: &'a C,
    genres: &'a G,
}

impl<C, G> TitleResolver<'_, C, G>
where
    C: TaxonomyRepository,
    G: TaxonomyRepository,
{
    async fn resolve(
        &self,
        input: &TitleInput,
        errors: &mut FieldErrors,
    ) -> Result<TitlePatch, ApiError> {
        if let Some(ref name) = input.name {
            errors.check("name", not_blank(name));
        }
        if let Some(year) = input.year {
            errors.check("year", validate_year(year, Utc::now().year()));
        }

        let category_id = match input.category {
            None => None,
            Some(None) => Some(None),
            Some(Some(ref slug)) => match self.categories.find_by_slug(slug).await? {
                Some(category) => Some(Some(category.id)),
                None => {
                    errors.add("category", missing_slug(slug));
                    None
                }
            },
        };

        let genre_ids = match input.genre {
            None => None,
            Some(ref slugs) => {
                let mut ids = Vec::with_capacity(slugs.len());
                for slug in slugs {
                    match self.genres.find_by_slug(slug).await? {
                        Some(genre) if !ids.contains(&genre.id) => ids.push(genre.id),
                        Some(_) => {}
                        None => errors.add("genre", missing_slug(slug)),
                    }
                }
                Some(ids)
            }
        };

        Ok(TitlePatch {
            name: input.name.clone(),
            year: input.year,
            description: input.description.clone(),
            category_id,
            genre_ids,
        })
    }
}

// ── Read ─────────────────────────────────────────────────────────────────────

pub struct ListTitlesUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> ListTitlesUseCase<T> {
    pub async fn execute(
        &self,
        filter: &TitleFilter,
        page: PageRequest,
    ) -> Result<Listing<Title>, ApiError> {
        self.titles.list(filter, page).await
    }
}

pub struct GetTitleUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> GetTitleUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<Title, ApiError> {
        self.titles
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TitleNotFound)
    }
}

// ── Write ────────────────────────────────────────────────────────────────────

pub struct CreateTitleUseCase<T, C, G>
where
    T: TitleRepository,
    C: TaxonomyRepository,
    G: TaxonomyRepository,
{
    pub titles: T,
    pub categories: C,
    pub genres: G,
}

impl<T, C, G> CreateTitleUseCase<T, C, G>
where
    T: TitleRepository,
    C: TaxonomyRepository,
    G: TaxonomyRepository,
{
    pub async fn execute(
        &self,
        principal: Option<&User>,
        input: TitleInput,
    ) -> Result<Title, ApiError> {
        authorize(principal, Resource::Catalog, Action::Create)?;

        let mut errors = FieldErrors::new();
        if input.name.is_none() {
            errors.add("name", REQUIRED);
        }
        if input.year.is_none() {
            errors.add("year", REQUIRED);
        }
        if input.genre.is_none() {
            errors.add("genre", REQUIRED);
        }
        let resolver = TitleResolver {
            categories: &self.categories,
            genres: &self.genres,
        };
        let patch = resolver.resolve(&input, &mut errors).await?;
        errors.into_result()?;

        let title = self
            .titles
            .create(&TitleWrite {
                name: patch.name.unwrap_or_default(),
                year: patch.year.unwrap_or_default(),
                description: patch.description.flatten(),
                category_id: patch.category_id.flatten(),
                genre_ids: patch.genre_ids.unwrap_or_default(),
            })
            .await?;
        tracing::debug!(title_id = title.id, "title created");
        Ok(title)
    }
}

pub struct UpdateTitleUseCase<T, C, G>
where
    T: TitleRepository,
    C: TaxonomyRepository,
    G: TaxonomyRepository,
{
    pub titles: T,
    pub categories: C,
    pub genres: G,
}

impl<T, C, G> UpdateTitleUseCase<T, C, G>
where
    T: TitleRepository,
    C: TaxonomyRepository,
    G: TaxonomyRepository,
{
    pub async fn execute(
        &self,
        principal: Option<&User>,
        id: i32,
        input: TitleInput,
    ) -> Result<Title, ApiError> {
        authorize(principal, Resource::Catalog, Action::Update)?;
        if !self.titles.exists(id).await? {
            return Err(ApiError::TitleNotFound);
        }

        let mut errors = FieldErrors::new();
        let resolver = TitleResolver {
            categories: &self.categories,
            genres: &self.genres,
        };
        let patch = resolver.resolve(&input, &mut errors).await?;
        errors.into_result()?;

        self.titles.update(id, &patch).await
    }
}

pub struct DeleteTitleUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> DeleteTitleUseCase<T> {
    /// Reviews and their comments go with the title.
    pub async fn execute(&self, principal: Option<&User>, id: i32) -> Result<(), ApiError> {
        authorize(principal, Resource::Catalog, Action::Delete)?;
        if !self.titles.delete(id).await? {
            return Err(ApiError::TitleNotFound);
        }
        Ok(())
    }
}
