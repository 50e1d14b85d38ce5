use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionTrait,
    sea_query::{Expr, Query},
};

use yamdb_api_schema::{categories, comments, genre_titles, genres, reviews, titles, users};
use yamdb_core::error::NON_FIELD_ERRORS;
use yamdb_core::sea_ext::{contains_folded, fold_case, icontains};
use yamdb_domain::pagination::PageRequest;
use yamdb_domain::user::UserRole;

use crate::domain::repository::{
    CommentRepository, ReviewRepository, TaxonomyRepository, TitleRepository, UserRepository,
};
use crate::domain::types::{
    Comment, Listing, NewUser, Review, TaxonomyEntry, TaxonomyKind, Title, TitleFilter,
    TitlePatch, TitleWrite, User, UserPatch,
};
use crate::error::ApiError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Surface a unique-constraint violation as a field error; anything else is internal.
fn unique_or_internal(err: DbErr, field: &str, message: &str, context: &'static str) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::validation(field, message)
    } else {
        ApiError::Internal(anyhow::Error::new(err).context(context))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Listing<User>, ApiError> {
        let mut query = users::Entity::find();
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(icontains(users::Column::Username, search));
        }
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = query
            .order_by_asc(users::Column::Username)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .context("list users")?;
        let items = models
            .into_iter()
            .map(user_from_model)
            .collect::<Result<_, _>>()?;
        Ok(Listing { items, count })
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let model = users::ActiveModel {
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            bio: Set(user.bio.clone()),
            role: Set(user.role.as_str().to_owned()),
            is_superuser: Set(user.is_superuser),
            is_confirmed: Set(false),
            confirmation_version: Set(0),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            unique_or_internal(
                e,
                NON_FIELD_ERRORS,
                "A user with that username or email already exists.",
                "create user",
            )
        })?;
        user_from_model(model)
    }

    async fn update(&self, id: i32, patch: &UserPatch) -> Result<User, ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        let mut changed = false;
        if let Some(ref username) = patch.username {
            am.username = Set(username.clone());
            changed = true;
        }
        if let Some(ref email) = patch.email {
            am.email = Set(email.clone());
            changed = true;
        }
        if let Some(ref first_name) = patch.first_name {
            am.first_name = Set(first_name.clone());
            changed = true;
        }
        if let Some(ref last_name) = patch.last_name {
            am.last_name = Set(last_name.clone());
            changed = true;
        }
        if let Some(ref bio) = patch.bio {
            am.bio = Set(bio.clone());
            changed = true;
        }
        if let Some(role) = patch.role {
            am.role = Set(role.as_str().to_owned());
            changed = true;
        }
        if !changed {
            return self.find_by_id(id).await?.ok_or(ApiError::UserNotFound);
        }
        let model = am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ApiError::UserNotFound,
            e => unique_or_internal(
                e,
                NON_FIELD_ERRORS,
                "A user with that username or email already exists.",
                "update user",
            ),
        })?;
        user_from_model(model)
    }

    async fn promote_superuser(&self, id: i32) -> Result<User, ApiError> {
        let model = users::ActiveModel {
            id: Set(id),
            role: Set(UserRole::Admin.as_str().to_owned()),
            is_superuser: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => ApiError::UserNotFound,
            e => ApiError::Internal(anyhow::Error::new(e).context("promote superuser")),
        })?;
        user_from_model(model)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }

    async fn consume_confirmation(
        &self,
        id: i32,
        expected_version: i32,
    ) -> Result<bool, ApiError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::ConfirmationVersion,
                Expr::col(users::Column::ConfirmationVersion).add(1),
            )
            .col_expr(users::Column::IsConfirmed, Expr::value(true))
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::ConfirmationVersion.eq(expected_version))
            .exec(&self.db)
            .await
            .context("consume confirmation code")?;
        Ok(result.rows_affected == 1)
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("stored role of user {}", model.id))?;
    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        bio: model.bio,
        role,
        is_superuser: model.is_superuser,
        is_confirmed: model.is_confirmed,
        confirmation_version: model.confirmation_version,
        date_joined: model.date_joined,
    })
}

// ── Category / genre repositories ────────────────────────────────────────────

const DUPLICATE_SLUG: &str = "An entry with this slug already exists.";

macro_rules! taxonomy_repository {
    ($repo:ident, $entity:ident, $kind:expr, $label:literal) => {
        #[derive(Clone)]
        pub struct $repo {
            pub db: DatabaseConnection,
        }

        impl TaxonomyRepository for $repo {
            const KIND: TaxonomyKind = $kind;

            async fn list(
                &self,
                search: Option<&str>,
                page: PageRequest,
            ) -> Result<Listing<TaxonomyEntry>, ApiError> {
                let mut query = $entity::Entity::find();
                if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
                    query = query.filter(contains_folded($entity::Column::NameFolded, search));
                }
                let count = query
                    .clone()
                    .count(&self.db)
                    .await
                    .context(concat!("count ", $label))?;
                let models = query
                    .order_by_asc($entity::Column::Name)
                    .order_by_asc($entity::Column::Id)
                    .offset(page.offset)
                    .limit(page.limit)
                    .all(&self.db)
                    .await
                    .context(concat!("list ", $label))?;
                let items = models
                    .into_iter()
                    .map(|m| TaxonomyEntry {
                        id: m.id,
                        name: m.name,
                        slug: m.slug,
                    })
                    .collect();
                Ok(Listing { items, count })
            }

            async fn find_by_slug(&self, slug: &str) -> Result<Option<TaxonomyEntry>, ApiError> {
                let model = $entity::Entity::find()
                    .filter($entity::Column::Slug.eq(slug))
                    .one(&self.db)
                    .await
                    .context(concat!("find ", $label, " by slug"))?;
                Ok(model.map(|m| TaxonomyEntry {
                    id: m.id,
                    name: m.name,
                    slug: m.slug,
                }))
            }

            async fn create(&self, name: &str, slug: &str) -> Result<TaxonomyEntry, ApiError> {
                let model = $entity::ActiveModel {
                    name: Set(name.to_owned()),
                    name_folded: Set(fold_case(name)),
                    slug: Set(slug.to_owned()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .map_err(|e| {
                    unique_or_internal(e, "slug", DUPLICATE_SLUG, concat!("create ", $label))
                })?;
                Ok(TaxonomyEntry {
                    id: model.id,
                    name: model.name,
                    slug: model.slug,
                })
            }

            async fn delete_by_slug(&self, slug: &str) -> Result<bool, ApiError> {
                let result = $entity::Entity::delete_many()
                    .filter($entity::Column::Slug.eq(slug))
                    .exec(&self.db)
                    .await
                    .context(concat!("delete ", $label))?;
                Ok(result.rows_affected > 0)
            }
        }
    };
}

taxonomy_repository!(
    DbCategoryRepository,
    categories,
    TaxonomyKind::Category,
    "category"
);
taxonomy_repository!(DbGenreRepository, genres, TaxonomyKind::Genre, "genre");

// ── Title repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTitleRepository {
    pub db: DatabaseConnection,
}

impl TitleRepository for DbTitleRepository {
    async fn list(
        &self,
        filter: &TitleFilter,
        page: PageRequest,
    ) -> Result<Listing<Title>, ApiError> {
        let mut query = titles::Entity::find();
        if let Some(name) = non_empty(&filter.name) {
            query = query.filter(contains_folded(
                (titles::Entity, titles::Column::NameFolded),
                name,
            ));
        }
        if let Some(year) = filter.year {
            query = query.filter(titles::Column::Year.eq(year));
        }
        if let Some(category) = non_empty(&filter.category) {
            query = query.filter(
                titles::Column::CategoryId.in_subquery(
                    Query::select()
                        .column((categories::Entity, categories::Column::Id))
                        .from(categories::Entity)
                        .and_where(icontains(
                            (categories::Entity, categories::Column::Slug),
                            category,
                        ))
                        .to_owned(),
                ),
            );
        }
        if let Some(genre) = non_empty(&filter.genre) {
            query = query.filter(
                titles::Column::Id.in_subquery(
                    Query::select()
                        .column((genre_titles::Entity, genre_titles::Column::TitleId))
                        .from(genre_titles::Entity)
                        .inner_join(
                            genres::Entity,
                            Expr::col((genres::Entity, genres::Column::Id))
                                .equals((genre_titles::Entity, genre_titles::Column::GenreId)),
                        )
                        .and_where(icontains((genres::Entity, genres::Column::Slug), genre))
                        .to_owned(),
                ),
            );
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count titles")?;
        let models = query
            .order_by_asc(titles::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .context("list titles")?;
        let items = hydrate_titles(&self.db, models).await?;
        Ok(Listing { items, count })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Title>, ApiError> {
        let Some(model) = titles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find title by id")?
        else {
            return Ok(None);
        };
        Ok(hydrate_titles(&self.db, vec![model]).await?.pop())
    }

    async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        let count = titles::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .context("check title exists")?;
        Ok(count > 0)
    }

    async fn create(&self, title: &TitleWrite) -> Result<Title, ApiError> {
        let id = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                let title = title.clone();
                Box::pin(async move {
                    let model = titles::ActiveModel {
                        name_folded: Set(fold_case(&title.name)),
                        name: Set(title.name),
                        year: Set(title.year),
                        description: Set(title.description),
                        category_id: Set(title.category_id),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    replace_genres(txn, model.id, &title.genre_ids).await?;
                    Ok(model.id)
                })
            })
            .await
            .context("create title with genres")?;
        self.find_by_id(id).await?.ok_or(ApiError::TitleNotFound)
    }

    async fn update(&self, id: i32, patch: &TitlePatch) -> Result<Title, ApiError> {
        let found = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let patch = patch.clone();
                Box::pin(async move {
                    let Some(model) = titles::Entity::find_by_id(id).one(txn).await? else {
                        return Ok(false);
                    };
                    let mut am: titles::ActiveModel = model.into();
                    if let Some(name) = patch.name {
                        am.name_folded = Set(fold_case(&name));
                        am.name = Set(name);
                    }
                    if let Some(year) = patch.year {
                        am.year = Set(year);
                    }
                    if let Some(description) = patch.description {
                        am.description = Set(description);
                    }
                    if let Some(category_id) = patch.category_id {
                        am.category_id = Set(category_id);
                    }
                    if am.is_changed() {
                        am.update(txn).await?;
                    }
                    if let Some(genre_ids) = patch.genre_ids {
                        replace_genres(txn, id, &genre_ids).await?;
                    }
                    Ok(true)
                })
            })
            .await
            .context("update title with genres")?;
        if !found {
            return Err(ApiError::TitleNotFound);
        }
        self.find_by_id(id).await?.ok_or(ApiError::TitleNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = titles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete title")?;
        Ok(result.rows_affected > 0)
    }
}

async fn replace_genres<C>(db: &C, title_id: i32, genre_ids: &[i32]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    genre_titles::Entity::delete_many()
        .filter(genre_titles::Column::TitleId.eq(title_id))
        .exec(db)
        .await?;
    let mut seen = Vec::with_capacity(genre_ids.len());
    for &genre_id in genre_ids {
        if !seen.contains(&genre_id) {
            seen.push(genre_id);
        }
    }
    if seen.is_empty() {
        return Ok(());
    }
    genre_titles::Entity::insert_many(seen.into_iter().map(|genre_id| {
        genre_titles::ActiveModel {
            title_id: Set(title_id),
            genre_id: Set(genre_id),
            ..Default::default()
        }
    }))
    .exec(db)
    .await?;
    Ok(())
}

/// Attach category, genres and rating to title rows, keeping row order.
async fn hydrate_titles(
    db: &DatabaseConnection,
    models: Vec<titles::Model>,
) -> Result<Vec<Title>, ApiError> {
    if models.is_empty() {
        return Ok(vec![]);
    }
    let title_ids: Vec<i32> = models.iter().map(|m| m.id).collect();

    let category_ids: Vec<i32> = models.iter().filter_map(|m| m.category_id).collect();
    let categories: HashMap<i32, TaxonomyEntry> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(db)
            .await
            .context("load title categories")?
            .into_iter()
            .map(|m| {
                (
                    m.id,
                    TaxonomyEntry {
                        id: m.id,
                        name: m.name,
                        slug: m.slug,
                    },
                )
            })
            .collect()
    };

    let mut genres_by_title: HashMap<i32, Vec<TaxonomyEntry>> = HashMap::new();
    let links = genre_titles::Entity::find()
        .filter(genre_titles::Column::TitleId.is_in(title_ids.clone()))
        .order_by_asc(genre_titles::Column::Id)
        .find_also_related(genres::Entity)
        .all(db)
        .await
        .context("load title genres")?;
    for (link, genre) in links {
        if let Some(genre) = genre {
            genres_by_title
                .entry(link.title_id)
                .or_default()
                .push(TaxonomyEntry {
                    id: genre.id,
                    name: genre.name,
                    slug: genre.slug,
                });
        }
    }

    let scores: Vec<(i32, i32)> = reviews::Entity::find()
        .select_only()
        .column(reviews::Column::TitleId)
        .column(reviews::Column::Score)
        .filter(reviews::Column::TitleId.is_in(title_ids))
        .into_tuple()
        .all(db)
        .await
        .context("load title scores")?;
    let mut totals: HashMap<i32, (i64, i64)> = HashMap::new();
    for (title_id, score) in scores {
        let entry = totals.entry(title_id).or_default();
        entry.0 += i64::from(score);
        entry.1 += 1;
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let rating = totals
                .get(&m.id)
                .map(|&(sum, n)| sum as f64 / n as f64)
                .unwrap_or(0.0);
            Title {
                id: m.id,
                name: m.name,
                year: m.year,
                description: m.description,
                category: m.category_id.and_then(|id| categories.get(&id).cloned()),
                genres: genres_by_title.remove(&m.id).unwrap_or_default(),
                rating,
            }
        })
        .collect())
}

// ── Review repository ────────────────────────────────────────────────────────

const DUPLICATE_REVIEW: &str = "You have already reviewed this title.";

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl DbReviewRepository {
    async fn title_name(&self, title_id: i32) -> Result<String, ApiError> {
        let title = titles::Entity::find_by_id(title_id)
            .one(&self.db)
            .await
            .context("load review title")?
            .context("review title missing")?;
        Ok(title.name)
    }
}

impl ReviewRepository for DbReviewRepository {
    async fn list_by_title(
        &self,
        title_id: i32,
        page: PageRequest,
    ) -> Result<Listing<Review>, ApiError> {
        let query = reviews::Entity::find().filter(reviews::Column::TitleId.eq(title_id));
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count reviews")?;
        let rows = query
            .order_by_desc(reviews::Column::PubDate)
            .order_by_desc(reviews::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("list reviews")?;
        if rows.is_empty() {
            return Ok(Listing {
                items: vec![],
                count,
            });
        }
        let title_name = self.title_name(title_id).await?;
        let items = rows
            .into_iter()
            .map(|(review, author)| review_from_model(review, author, &title_name))
            .collect::<Result<_, _>>()?;
        Ok(Listing { items, count })
    }

    async fn find(&self, title_id: i32, review_id: i32) -> Result<Option<Review>, ApiError> {
        let Some((review, author)) = reviews::Entity::find_by_id(review_id)
            .filter(reviews::Column::TitleId.eq(title_id))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find review")?
        else {
            return Ok(None);
        };
        let title_name = self.title_name(title_id).await?;
        review_from_model(review, author, &title_name).map(Some)
    }

    async fn exists_for_author(&self, title_id: i32, author_id: i32) -> Result<bool, ApiError> {
        let count = reviews::Entity::find()
            .filter(reviews::Column::TitleId.eq(title_id))
            .filter(reviews::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("check review exists for author")?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        title_id: i32,
        author_id: i32,
        text: &str,
        score: i32,
    ) -> Result<Review, ApiError> {
        let model = reviews::ActiveModel {
            title_id: Set(title_id),
            author_id: Set(author_id),
            text: Set(text.to_owned()),
            score: Set(score),
            pub_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_or_internal(e, NON_FIELD_ERRORS, DUPLICATE_REVIEW, "create review"))?;
        self.find(title_id, model.id)
            .await?
            .ok_or(ApiError::ReviewNotFound)
    }

    async fn update(
        &self,
        id: i32,
        text: Option<&str>,
        score: Option<i32>,
    ) -> Result<Review, ApiError> {
        let model = reviews::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("load review for update")?
            .ok_or(ApiError::ReviewNotFound)?;
        let title_id = model.title_id;
        let mut am: reviews::ActiveModel = model.into();
        if let Some(text) = text {
            am.text = Set(text.to_owned());
        }
        if let Some(score) = score {
            am.score = Set(score);
        }
        if am.is_changed() {
            am.update(&self.db).await.context("update review")?;
        }
        self.find(title_id, id).await?.ok_or(ApiError::ReviewNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = reviews::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(result.rows_affected > 0)
    }
}

fn review_from_model(
    review: reviews::Model,
    author: Option<users::Model>,
    title_name: &str,
) -> Result<Review, ApiError> {
    let author = author.with_context(|| format!("author of review {} missing", review.id))?;
    Ok(Review {
        id: review.id,
        title_id: review.title_id,
        title_name: title_name.to_owned(),
        author_id: review.author_id,
        author_username: author.username,
        text: review.text,
        score: review.score,
        pub_date: review.pub_date,
    })
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl DbCommentRepository {
    async fn review_text(&self, review_id: i32) -> Result<String, ApiError> {
        let review = reviews::Entity::find_by_id(review_id)
            .one(&self.db)
            .await
            .context("load comment review")?
            .context("comment review missing")?;
        Ok(review.text)
    }
}

impl CommentRepository for DbCommentRepository {
    async fn list_by_review(
        &self,
        review_id: i32,
        page: PageRequest,
    ) -> Result<Listing<Comment>, ApiError> {
        let query = comments::Entity::find().filter(comments::Column::ReviewId.eq(review_id));
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count comments")?;
        let rows = query
            .order_by_desc(comments::Column::PubDate)
            .order_by_desc(comments::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("list comments")?;
        if rows.is_empty() {
            return Ok(Listing {
                items: vec![],
                count,
            });
        }
        let review_text = self.review_text(review_id).await?;
        let items = rows
            .into_iter()
            .map(|(comment, author)| comment_from_model(comment, author, &review_text))
            .collect::<Result<_, _>>()?;
        Ok(Listing { items, count })
    }

    async fn find(&self, review_id: i32, comment_id: i32) -> Result<Option<Comment>, ApiError> {
        let Some((comment, author)) = comments::Entity::find_by_id(comment_id)
            .filter(comments::Column::ReviewId.eq(review_id))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find comment")?
        else {
            return Ok(None);
        };
        let review_text = self.review_text(review_id).await?;
        comment_from_model(comment, author, &review_text).map(Some)
    }

    async fn create(
        &self,
        review_id: i32,
        author_id: i32,
        text: &str,
    ) -> Result<Comment, ApiError> {
        let model = comments::ActiveModel {
            review_id: Set(review_id),
            author_id: Set(author_id),
            text: Set(text.to_owned()),
            pub_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create comment")?;
        self.find(review_id, model.id)
            .await?
            .ok_or(ApiError::CommentNotFound)
    }

    async fn update(&self, id: i32, text: &str) -> Result<Comment, ApiError> {
        let model = comments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("load comment for update")?
            .ok_or(ApiError::CommentNotFound)?;
        let review_id = model.review_id;
        let mut am: comments::ActiveModel = model.into();
        am.text = Set(text.to_owned());
        if am.is_changed() {
            am.update(&self.db).await.context("update comment")?;
        }
        self.find(review_id, id)
            .await?
            .ok_or(ApiError::CommentNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = comments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete comment")?;
        Ok(result.rows_affected > 0)
    }
}

fn comment_from_model(
    comment: comments::Model,
    author: Option<users::Model>,
    review_text: &str,
) -> Result<Comment, ApiError> {
    let author = author.with_context(|| format!("author of comment {} missing", comment.id))?;
    Ok(Comment {
        id: comment.id,
        review_id: comment.review_id,
        review_text: review_text.to_owned(),
        author_id: comment.author_id,
        author_username: author.username,
        text: comment.text,
        pub_date: comment.pub_date,
    })
}
