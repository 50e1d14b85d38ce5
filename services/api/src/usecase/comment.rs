use yamdb_core::error::FieldErrors;
use yamdb_domain::pagination::PageRequest;

use crate::domain::policy::{Action, Resource, authorize, require_user};
use crate::domain::repository::{CommentRepository, ReviewRepository, TitleRepository};
use crate::domain::types::{Comment, Listing, User};
use crate::domain::validation::{REQUIRED, not_blank};
use crate::error::ApiError;

/// Both the title and the review must exist, and the review must belong to
/// the title.
async fn require_review<T, R>(
    titles: &T,
    reviews: &R,
    title_id: i32,
    review_id: i32,
) -> Result<(), ApiError>
where
    T: TitleRepository,
    R: ReviewRepository,
{
    if !titles.exists(title_id).await? {
        return Err(ApiError::TitleNotFound);
    }
    if reviews.find(title_id, review_id).await?.is_none() {
        return Err(ApiError::ReviewNotFound);
    }
    Ok(())
}

fn check_text(text: Option<&str>, required: bool) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    match text {
        None if required => errors.add("text", REQUIRED),
        None => {}
        Some(text) => errors.check("text", not_blank(text)),
    }
    Ok(errors.into_result()?)
}

// ── Read ─────────────────────────────────────────────────────────────────────

pub struct ListCommentsUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T, R, C> ListCommentsUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub async fn execute(
        &self,
        title_id: i32,
        review_id: i32,
        page: PageRequest,
    ) -> Result<Listing<Comment>, ApiError> {
        require_review(&self.titles, &self.reviews, title_id, review_id).await?;
        self.comments.list_by_review(review_id, page).await
    }
}

pub struct GetCommentUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T, R, C> GetCommentUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub async fn execute(
        &self,
        title_id: i32,
        review_id: i32,
        comment_id: i32,
    ) -> Result<Comment, ApiError> {
        require_review(&self.titles, &self.reviews, title_id, review_id).await?;
        self.comments
            .find(review_id, comment_id)
            .await?
            .ok_or(ApiError::CommentNotFound)
    }
}

// ── Write ────────────────────────────────────────────────────────────────────

pub struct CreateCommentUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T, R, C> CreateCommentUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub async fn execute(
        &self,
        principal: Option<&User>,
        title_id: i32,
        review_id: i32,
        text: Option<String>,
    ) -> Result<Comment, ApiError> {
        authorize(principal, Resource::Discussion, Action::Create)?;
        let author = require_user(principal)?;
        require_review(&self.titles, &self.reviews, title_id, review_id).await?;
        check_text(text.as_deref(), true)?;
        self.comments
            .create(review_id, author.id, &text.unwrap_or_default())
            .await
    }
}

pub struct UpdateCommentUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T, R, C> UpdateCommentUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub async fn execute(
        &self,
        principal: Option<&User>,
        (title_id, review_id, comment_id): (i32, i32, i32),
        text: Option<String>,
    ) -> Result<Comment, ApiError> {
        require_user(principal)?;
        require_review(&self.titles, &self.reviews, title_id, review_id).await?;
        let comment = self
            .comments
            .find(review_id, comment_id)
            .await?
            .ok_or(ApiError::CommentNotFound)?;
        authorize(
            principal,
            Resource::Post {
                author_id: comment.author_id,
            },
            Action::Update,
        )?;
        check_text(text.as_deref(), false)?;
        match text {
            Some(text) => self.comments.update(comment.id, &text).await,
            None => Ok(comment),
        }
    }
}

pub struct DeleteCommentUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T, R, C> DeleteCommentUseCase<T, R, C>
where
    T: TitleRepository,
    R: ReviewRepository,
    C: CommentRepository,
{
    pub async fn execute(
        &self,
        principal: Option<&User>,
        (title_id, review_id, comment_id): (i32, i32, i32),
    ) -> Result<(), ApiError> {
        require_user(principal)?;
        require_review(&self.titles, &self.reviews, title_id, review_id).await?;
        let comment = self
            .comments
            .find(review_id, comment_id)
            .await?
            .ok_or(ApiError::CommentNotFound)?;
        authorize(
            principal,
            Resource::Post {
                author_id: comment.author_id,
            },
            Action::Delete,
        )?;
        if !self.comments.delete(comment.id).await? {
            return Err(ApiError::CommentNotFound);
        }
        Ok(())
    }
}
