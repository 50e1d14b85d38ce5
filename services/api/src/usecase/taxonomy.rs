//! Categories and genres share one set of usecases, parameterized by the
//! repository's [`TaxonomyRepository::KIND`].

use yamdb_core::error::FieldErrors;
use yamdb_domain::pagination::PageRequest;

use crate::domain::policy::{Action, Resource, authorize};
use crate::domain::repository::TaxonomyRepository;
use crate::domain::types::{Listing, TaxonomyEntry, User};
use crate::domain::validation::{
    REQUIRED, TAXONOMY_NAME_MAX_LEN, max_len, not_blank, validate_slug,
};
use crate::error::ApiError;

pub struct ListTaxonomyUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> ListTaxonomyUseCase<R> {
    pub async fn execute(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Listing<TaxonomyEntry>, ApiError> {
        self.repo.list(search, page).await
    }
}

pub struct CreateTaxonomyInput {
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub struct CreateTaxonomyUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> CreateTaxonomyUseCase<R> {
    pub async fn execute(
        &self,
        principal: Option<&User>,
        input: CreateTaxonomyInput,
    ) -> Result<TaxonomyEntry, ApiError> {
        authorize(principal, Resource::Catalog, Action::Create)?;

        let mut errors = FieldErrors::new();
        match input.name.as_deref() {
            None => errors.add("name", REQUIRED),
            Some(name) => errors.check(
                "name",
                not_blank(name).and_then(|()| max_len(name, TAXONOMY_NAME_MAX_LEN)),
            ),
        }
        match input.slug.as_deref() {
            None => errors.add("slug", REQUIRED),
            Some(slug) => errors.check("slug", validate_slug(slug)),
        }
        if let Some(slug) = input.slug.as_deref().filter(|_| !errors.contains("slug")) {
            if self.repo.find_by_slug(slug).await?.is_some() {
                errors.add("slug", "An entry with this slug already exists.");
            }
        }
        errors.into_result()?;

        let name = input.name.unwrap_or_default();
        let slug = input.slug.unwrap_or_default();
        self.repo.create(&name, &slug).await
    }
}

pub struct DeleteTaxonomyUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> DeleteTaxonomyUseCase<R> {
    pub async fn execute(&self, principal: Option<&User>, slug: &str) -> Result<(), ApiError> {
        authorize(principal, Resource::Catalog, Action::Delete)?;
        if !self.repo.delete_by_slug(slug).await? {
            return Err(R::KIND.not_found());
        }
        Ok(())
    }
}
