#![allow(async_fn_in_trait)]

use yamdb_domain::pagination::PageRequest;

use crate::domain::types::{
    Comment, Listing, MailMessage, NewUser, Review, TaxonomyEntry, TaxonomyKind, Title,
    TitleFilter, TitlePatch, TitleWrite, User, UserPatch,
};
use crate::error::ApiError;

pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Users ordered by username, optionally filtered by a username substring.
    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Listing<User>, ApiError>;

    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;
    async fn update(&self, id: i32, patch: &UserPatch) -> Result<User, ApiError>;
    async fn promote_superuser(&self, id: i32) -> Result<User, ApiError>;

    /// Returns `false` if the user did not exist.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;

    /// Mark the user confirmed and bump `confirmation_version`, but only if
    /// the stored version still equals `expected_version`.
    ///
    /// Returns `false` when another exchange won the race.
    async fn consume_confirmation(&self, id: i32, expected_version: i32)
    -> Result<bool, ApiError>;
}

/// Repository for one flat classification (categories or genres).
pub trait TaxonomyRepository: Send + Sync {
    const KIND: TaxonomyKind;

    /// Entries ordered by name, optionally filtered by a name substring.
    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Listing<TaxonomyEntry>, ApiError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<TaxonomyEntry>, ApiError>;
    async fn create(&self, name: &str, slug: &str) -> Result<TaxonomyEntry, ApiError>;

    /// Returns `false` if no entry had this slug.
    async fn delete_by_slug(&self, slug: &str) -> Result<bool, ApiError>;
}

pub trait TitleRepository: Send + Sync {
    async fn list(
        &self,
        filter: &TitleFilter,
        page: PageRequest,
    ) -> Result<Listing<Title>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Title>, ApiError>;
    async fn exists(&self, id: i32) -> Result<bool, ApiError>;

    /// Insert the title and its genre links in one transaction.
    async fn create(&self, title: &TitleWrite) -> Result<Title, ApiError>;
    async fn update(&self, id: i32, patch: &TitlePatch) -> Result<Title, ApiError>;
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

pub trait ReviewRepository: Send + Sync {
    /// Newest first.
    async fn list_by_title(
        &self,
        title_id: i32,
        page: PageRequest,
    ) -> Result<Listing<Review>, ApiError>;

    /// Looks up a review within its title; a review of another title is `None`.
    async fn find(&self, title_id: i32, review_id: i32) -> Result<Option<Review>, ApiError>;
    async fn exists_for_author(&self, title_id: i32, author_id: i32) -> Result<bool, ApiError>;

    async fn create(
        &self,
        title_id: i32,
        author_id: i32,
        text: &str,
        score: i32,
    ) -> Result<Review, ApiError>;

    async fn update(
        &self,
        id: i32,
        text: Option<&str>,
        score: Option<i32>,
    ) -> Result<Review, ApiError>;

    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

pub trait CommentRepository: Send + Sync {
    /// Newest first.
    async fn list_by_review(
        &self,
        review_id: i32,
        page: PageRequest,
    ) -> Result<Listing<Comment>, ApiError>;

    async fn find(&self, review_id: i32, comment_id: i32) -> Result<Option<Comment>, ApiError>;
    async fn create(&self, review_id: i32, author_id: i32, text: &str)
    -> Result<Comment, ApiError>;
    async fn update(&self, id: i32, text: &str) -> Result<Comment, ApiError>;
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Outgoing mail delivery.
pub trait MailPort: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), ApiError>;
}
