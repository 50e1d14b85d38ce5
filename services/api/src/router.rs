use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;

use yamdb_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::error::ApiError;
use crate::handlers::{
    auth::{signup, token},
    comments::{create_comment, delete_comment, get_comment, list_comments, update_comment},
    health::{healthz, readyz},
    reviews::{create_review, delete_review, get_review, list_reviews, update_review},
    taxonomy::{
        create_category, create_genre, delete_category, delete_genre, list_categories,
        list_genres,
    },
    titles::{create_title, delete_title, get_title, list_titles, update_title},
    users::{create_user, delete_user, get_me, get_user, list_users, update_me, update_user},
};
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/signup/", post(signup))
        .route("/auth/token/", post(token))
        // Users
        .route("/users/", get(list_users).post(create_user))
        .route("/users/me/", get(get_me).patch(update_me))
        .route(
            "/users/{username}/",
            get(get_user).patch(update_user).delete(delete_user),
        )
        // Categories / genres
        .route("/categories/", get(list_categories).post(create_category))
        .route("/categories/{slug}/", delete(delete_category))
        .route("/genres/", get(list_genres).post(create_genre))
        .route("/genres/{slug}/", delete(delete_genre))
        // Titles
        .route("/titles/", get(list_titles).post(create_title))
        .route(
            "/titles/{title_id}/",
            get(get_title).patch(update_title).delete(delete_title),
        )
        // Reviews
        .route(
            "/titles/{title_id}/reviews/",
            get(list_reviews).post(create_review),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/",
            get(get_review).patch(update_review).delete(delete_review),
        )
        // Comments
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments/",
            get(list_comments).post(create_comment),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}/",
            get(get_comment).patch(update_comment).delete(delete_comment),
        )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest(API_PREFIX, api_routes())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
