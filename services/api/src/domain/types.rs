use chrono::{DateTime, Utc};

use yamdb_domain::user::UserRole;

use crate::error::ApiError;

/// Registered account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: UserRole,
    pub is_superuser: bool,
    pub is_confirmed: bool,
    /// Confirmation codes are only accepted for the current value.
    pub confirmation_version: i32,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Admin by role or by the platform-level superuser flag.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin || self.is_superuser
    }

    pub fn is_moderator(&self) -> bool {
        self.role == UserRole::Moderator
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: UserRole,
    pub is_superuser: bool,
}

/// Partial user update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
}

/// Flat classification used by both categories and genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyKind {
    Category,
    Genre,
}

impl TaxonomyKind {
    pub fn not_found(self) -> ApiError {
        match self {
            Self::Category => ApiError::CategoryNotFound,
            Self::Genre => ApiError::GenreNotFound,
        }
    }
}

/// A category or genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<TaxonomyEntry>,
    pub genres: Vec<TaxonomyEntry>,
    /// Mean review score, `0.0` without reviews.
    pub rating: f64,
}

/// Title fields with relations already resolved to ids.
#[derive(Debug, Clone, Default)]
pub struct TitleWrite {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct TitlePatch {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<i32>>,
    /// Replaces the whole genre set when present.
    pub genre_ids: Option<Vec<i32>>,
}

/// Title list filters; every predicate is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub title_id: i32,
    pub title_name: String,
    pub author_id: i32,
    pub author_username: String,
    pub text: String,
    pub score: i32,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i32,
    pub review_id: i32,
    pub review_text: String,
    pub author_id: i32,
    pub author_username: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

/// One page of rows plus the total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub count: u64,
}

/// Outgoing mail message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Review score bounds and default.
pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;
pub const DEFAULT_SCORE: i32 = 1;
