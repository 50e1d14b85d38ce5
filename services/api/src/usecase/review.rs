use yamdb_core::error::{FieldErrors, NON_FIELD_ERRORS};
use yamdb_domain::pagination::PageRequest;

use crate::domain::policy::{Action, Resource, authorize, require_user};
use crate::domain::repository::{ReviewRepository, TitleRepository};
use crate::domain::types::{DEFAULT_SCORE, Listing, Review, User};
use crate::domain::validation::{REQUIRED, not_blank, validate_score};
use crate::error::ApiError;

const ALREADY_REVIEWED: &str = "You have already reviewed this title.";

#[derive(Debug, Clone, Default)]
pub struct ReviewInput {
    pub text: Option<String>,
    pub score: Option<i32>,
}

fn check_fields(input: &ReviewInput, errors: &mut FieldErrors) {
    if let Some(ref text) = input.text {
        errors.check("text", not_blank(text));
    }
    if let Some(score) = input.score {
        errors.check("score", validate_score(score));
    }
}

async fn require_title<T: TitleRepository>(titles: &T, title_id: i32) -> Result<(), ApiError> {
    if titles.exists(title_id).await? {
        Ok(())
    } else {
        Err(ApiError::TitleNotFound)
    }
}

// ── Read ─────────────────────────────────────────────────────────────────────

pub struct ListReviewsUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> ListReviewsUseCase<T, R> {
    pub async fn execute(
        &self,
        title_id: i32,
        page: PageRequest,
    ) -> Result<Listing<Review>, ApiError> {
        require_title(&self.titles, title_id).await?;
        self.reviews.list_by_title(title_id, page).await
    }
}

pub struct GetReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> GetReviewUseCase<T, R> {
    pub async fn execute(&self, title_id: i32, review_id: i32) -> Result<Review, ApiError> {
        require_title(&self.titles, title_id).await?;
        self.reviews
            .find(title_id, review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)
    }
}

// ── Write ────────────────────────────────────────────────────────────────────

pub struct CreateReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> CreateReviewUseCase<T, R> {
    /// One review per (title, author); `score` defaults to 1.
    pub async fn execute(
        &self,
        principal: Option<&User>,
        title_id: i32,
        input: ReviewInput,
    ) -> Result<Review, ApiError> {
        authorize(principal, Resource::Discussion, Action::Create)?;
        let author = require_user(principal)?;
        require_title(&self.titles, title_id).await?;

        let mut errors = FieldErrors::new();
        if input.text.is_none() {
            errors.add("text", REQUIRED);
        }
        check_fields(&input, &mut errors);
        if self.reviews.exists_for_author(title_id, author.id).await? {
            errors.add(NON_FIELD_ERRORS, ALREADY_REVIEWED);
        }
        errors.into_result()?;

        let text = input.text.unwrap_or_default();
        let score = input.score.unwrap_or(DEFAULT_SCORE);
        self.reviews.create(title_id, author.id, &text, score).await
    }
}

pub struct UpdateReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> UpdateReviewUseCase<T, R> {
    pub async fn execute(
        &self,
        principal: Option<&User>,
        title_id: i32,
        review_id: i32,
        input: ReviewInput,
    ) -> Result<Review, ApiError> {
        require_user(principal)?;
        require_title(&self.titles, title_id).await?;
        let review = self
            .reviews
            .find(title_id, review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)?;
        authorize(
            principal,
            Resource::Post {
                author_id: review.author_id,
            },
            Action::Update,
        )?;

        let mut errors = FieldErrors::new();
        check_fields(&input, &mut errors);
        errors.into_result()?;

        self.reviews
            .update(review.id, input.text.as_deref(), input.score)
            .await
    }
}

pub struct DeleteReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> DeleteReviewUseCase<T, R> {
    pub async fn execute(
        &self,
        principal: Option<&User>,
        title_id: i32,
        review_id: i32,
    ) -> Result<(), ApiError> {
        require_user(principal)?;
        require_title(&self.titles, title_id).await?;
        let review = self
            .reviews
            .find(title_id, review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)?;
        authorize(
            principal,
            Resource::Post {
                author_id: review.author_id,
            },
            Action::Delete,
        )?;
        if !self.reviews.delete(review.id).await? {
            return Err(ApiError::ReviewNotFound);
        }
        Ok(())
    }
}
