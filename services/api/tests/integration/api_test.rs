use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use url::form_urlencoded;
use yamdb_api::domain::repository::ReviewRepository;
use yamdb_api::error::ApiError;
use yamdb_api_schema::{comments, reviews};
use yamdb_core::error::NON_FIELD_ERRORS;
use yamdb_domain::user::UserRole;

use crate::helpers::{code_from_body, test_app};

fn encoded(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_health_probes() {
    let app = test_app().await;

    app.server.get("/healthz").await.assert_status_ok();
    app.server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_render_unknown_route_as_json_not_found() {
    let app = test_app().await;

    let resp = app.server.get("/api/v1/nope/").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["kind"], "NOT_FOUND");
}

// ── Signup / token ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_up_and_exchange_mailed_code() {
    let app = test_app().await;

    let resp = app
        .server
        .post("/api/v1/auth/signup/")
        .json(&json!({"username": "bob", "email": "bob@example.com"}))
        .await;
    resp.assert_status_ok();
    assert_eq!(
        resp.json::<Value>(),
        json!({"username": "bob", "email": "bob@example.com"})
    );

    let mails = app.mails();
    assert_eq!(mails.len(), 1);
    assert!(mails[0].contains("To: bob@example.com\n"));
    let code = code_from_body(&mails[0]);

    let wrong = app
        .server
        .post("/api/v1/auth/token/")
        .json(&json!({"username": "bob", "confirmation_code": "bogus"}))
        .await;
    wrong.assert_status(StatusCode::BAD_REQUEST);

    let resp = app
        .server
        .post("/api/v1/auth/token/")
        .json(&json!({"username": "bob", "confirmation_code": code}))
        .await;
    resp.assert_status_ok();
    let token = resp.json::<Value>()["token"].as_str().unwrap().to_owned();

    let me = app
        .server
        .get("/api/v1/users/me/")
        .authorization_bearer(&token)
        .await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["role"], "user");

    let replay = app
        .server
        .post("/api/v1/auth/token/")
        .json(&json!({"username": "bob", "confirmation_code": code}))
        .await;
    replay.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_reserved_username_me() {
    let app = test_app().await;

    let resp = app
        .server
        .post("/api/v1/auth/signup/")
        .json(&json!({"username": "me", "email": "me@example.com"}))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = resp.json::<Value>();
    assert_eq!(body["kind"], "VALIDATION_ERROR");
    assert!(body["fields"]["username"].is_array());
}

#[tokio::test]
async fn should_return_not_found_for_token_of_unknown_user() {
    let app = test_app().await;

    let resp = app
        .server
        .post("/api/v1/auth/token/")
        .json(&json!({"username": "ghost", "confirmation_code": "x"}))
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_malformed_bearer_token() {
    let app = test_app().await;

    let resp = app
        .server
        .get("/api/v1/titles/")
        .authorization_bearer("not-a-jwt")
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_restrict_user_admin_to_admins() {
    let app = test_app().await;
    let (_, user_token) = app.seed_user("alice", UserRole::User).await;
    let (_, admin_token) = app.seed_user("root", UserRole::Admin).await;

    app.server
        .get("/api/v1/users/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .get("/api/v1/users/")
        .authorization_bearer(&user_token)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let resp = app
        .server
        .get("/api/v1/users/")
        .authorization_bearer(&admin_token)
        .await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>()["count"], 2);

    let resp = app
        .server
        .post("/api/v1/users/")
        .authorization_bearer(&admin_token)
        .json(&json!({"username": "carol", "email": "carol@example.com", "role": "moderator"}))
        .await;
    resp.assert_status(StatusCode::CREATED);
    assert_eq!(resp.json::<Value>()["role"], "moderator");

    app.server
        .delete("/api/v1/users/carol/")
        .authorization_bearer(&admin_token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get("/api/v1/users/carol/")
        .authorization_bearer(&admin_token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_ignore_role_change_on_own_profile() {
    let app = test_app().await;
    let (_, token) = app.seed_user("alice", UserRole::User).await;

    let resp = app
        .server
        .patch("/api/v1/users/me/")
        .authorization_bearer(&token)
        .json(&json!({"bio": "reader", "role": "admin"}))
        .await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["bio"], "reader");
    assert_eq!(body["role"], "user");
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_allow_anonymous_reads_but_not_writes() {
    let app = test_app().await;
    let (_, user_token) = app.seed_user("alice", UserRole::User).await;

    app.server.get("/api/v1/titles/").await.assert_status_ok();
    app.server.get("/api/v1/categories/").await.assert_status_ok();

    app.server
        .post("/api/v1/categories/")
        .json(&json!({"name": "Films", "slug": "films"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .post("/api/v1/categories/")
        .authorization_bearer(&user_token)
        .json(&json!({"name": "Films", "slug": "films"}))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_create_title_with_slugs_and_reject_unknown_genre() {
    let app = test_app().await;
    let (_, admin) = app.seed_user("root", UserRole::Admin).await;
    app.seed_category("Films", "films").await;
    app.seed_genre("Drama", "drama").await;

    let resp = app
        .server
        .post("/api/v1/titles/")
        .authorization_bearer(&admin)
        .json(&json!({"name": "Solaris", "year": 1972, "category": "films", "genre": ["drama"]}))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let body = resp.json::<Value>();
    assert_eq!(body["category"], "films");
    assert_eq!(body["genre"], json!(["drama"]));

    let id = body["id"].as_i64().unwrap();
    let detail = app.server.get(&format!("/api/v1/titles/{id}/")).await;
    detail.assert_status_ok();
    let detail = detail.json::<Value>();
    assert_eq!(detail["category"], json!({"name": "Films", "slug": "films"}));
    assert_eq!(detail["genre"], json!([{"name": "Drama", "slug": "drama"}]));

    let resp = app
        .server
        .post("/api/v1/titles/")
        .authorization_bearer(&admin)
        .json(&json!({"name": "Stalker", "year": 1979, "genre": ["noir"]}))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert!(resp.json::<Value>()["fields"]["genre"].is_array());
}

#[tokio::test]
async fn should_reject_title_year_in_the_future() {
    let app = test_app().await;
    let (_, admin) = app.seed_user("root", UserRole::Admin).await;
    app.seed_genre("Drama", "drama").await;

    let resp = app
        .server
        .post("/api/v1/titles/")
        .authorization_bearer(&admin)
        .json(&json!({"name": "Later", "year": 9999, "genre": ["drama"]}))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert!(resp.json::<Value>()["fields"]["year"].is_array());
}

#[tokio::test]
async fn should_filter_titles_by_year_and_category() {
    let app = test_app().await;
    let films = app.seed_category("Films", "films").await;
    let books = app.seed_category("Books", "books").await;
    let drama = app.seed_genre("Drama", "drama").await;
    app.seed_title("Solaris", 1972, Some(films.id), vec![drama.id])
        .await;
    app.seed_title("Stalker", 1979, Some(films.id), vec![]).await;
    app.seed_title("Roadside Picnic", 1972, Some(books.id), vec![])
        .await;

    let resp = app.server.get("/api/v1/titles/?year=1972").await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>()["count"], 2);

    let resp = app
        .server
        .get("/api/v1/titles/?year=1972&category=films")
        .await;
    let body = resp.json::<Value>();
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "Solaris");

    let resp = app.server.get("/api/v1/titles/?genre=dra").await;
    assert_eq!(resp.json::<Value>()["count"], 1);

    let resp = app.server.get("/api/v1/titles/?name=picnic").await;
    assert_eq!(resp.json::<Value>()["count"], 1);

    app.server
        .get("/api/v1/titles/?year=abc")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_link_pages_with_limit_and_offset() {
    let app = test_app().await;
    for name in ["A", "B", "C"] {
        app.seed_title(name, 2000, None, vec![]).await;
    }

    let resp = app.server.get("/api/v1/titles/?limit=1&offset=1").await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["count"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["name"], "B");

    let next = body["next"].as_str().unwrap();
    assert!(next.starts_with("http://"));
    assert!(next.ends_with("/api/v1/titles/?limit=1&offset=2"));
    let previous = body["previous"].as_str().unwrap();
    assert!(previous.ends_with("/api/v1/titles/?limit=1"));

    let last = app.server.get("/api/v1/titles/?limit=1&offset=2").await;
    assert!(last.json::<Value>()["next"].is_null());
}

#[tokio::test]
async fn should_null_title_category_when_category_deleted() {
    let app = test_app().await;
    let (_, admin) = app.seed_user("root", UserRole::Admin).await;
    let films = app.seed_category("Films", "films").await;
    let title = app.seed_title("Solaris", 1972, Some(films.id), vec![]).await;

    app.server
        .delete("/api/v1/categories/films/")
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let resp = app
        .server
        .get(&format!("/api/v1/titles/{}/", title.id))
        .await;
    resp.assert_status_ok();
    assert!(resp.json::<Value>()["category"].is_null());

    app.server
        .delete("/api/v1/categories/films/")
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ── Reviews / comments ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_average_review_scores_into_rating() {
    let app = test_app().await;
    let title = app.seed_title("Solaris", 1972, None, vec![]).await;
    let (_, alice) = app.seed_user("alice", UserRole::User).await;
    let (_, bob) = app.seed_user("bob", UserRole::User).await;
    let reviews = format!("/api/v1/titles/{}/reviews/", title.id);

    for (token, score) in [(&alice, 8), (&bob, 5)] {
        app.server
            .post(&reviews)
            .authorization_bearer(token)
            .json(&json!({"text": "Seen it.", "score": score}))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let resp = app
        .server
        .get(&format!("/api/v1/titles/{}/", title.id))
        .await;
    assert_eq!(resp.json::<Value>()["rating"].as_f64(), Some(6.5));

    let dup = app
        .server
        .post(&reviews)
        .authorization_bearer(&alice)
        .json(&json!({"text": "Again.", "score": 1}))
        .await;
    dup.assert_status(StatusCode::BAD_REQUEST);
    assert!(dup.json::<Value>()["fields"]["non_field_errors"].is_array());
}

#[tokio::test]
async fn should_let_only_author_or_moderator_edit_review() {
    let app = test_app().await;
    let title = app.seed_title("Solaris", 1972, None, vec![]).await;
    let (_, alice) = app.seed_user("alice", UserRole::User).await;
    let (_, bob) = app.seed_user("bob", UserRole::User).await;
    let (_, moderator) = app.seed_user("mod", UserRole::Moderator).await;

    let created = app
        .server
        .post(&format!("/api/v1/titles/{}/reviews/", title.id))
        .authorization_bearer(&alice)
        .json(&json!({"text": "Slow.", "score": 4}))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created = created.json::<Value>();
    assert_eq!(created["author"], "alice");
    assert_eq!(created["title"], "Solaris");
    let path = format!(
        "/api/v1/titles/{}/reviews/{}/",
        title.id,
        created["id"].as_i64().unwrap()
    );

    app.server
        .patch(&path)
        .authorization_bearer(&bob)
        .json(&json!({"score": 1}))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let resp = app
        .server
        .patch(&path)
        .authorization_bearer(&alice)
        .json(&json!({"score": 7}))
        .await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>()["score"], 7);

    app.server
        .delete(&path)
        .authorization_bearer(&moderator)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_cascade_title_delete_to_reviews_and_comments() {
    let app = test_app().await;
    let (_, admin) = app.seed_user("root", UserRole::Admin).await;
    let (_, alice) = app.seed_user("alice", UserRole::User).await;
    let title = app.seed_title("Solaris", 1972, None, vec![]).await;

    let review = app
        .server
        .post(&format!("/api/v1/titles/{}/reviews/", title.id))
        .authorization_bearer(&alice)
        .json(&json!({"text": "Long.", "score": 9}))
        .await
        .json::<Value>();
    let comments = format!(
        "/api/v1/titles/{}/reviews/{}/comments/",
        title.id,
        review["id"].as_i64().unwrap()
    );

    let comment = app
        .server
        .post(&comments)
        .authorization_bearer(&alice)
        .json(&json!({"text": "Agreed."}))
        .await;
    comment.assert_status(StatusCode::CREATED);
    assert_eq!(comment.json::<Value>()["review"], "Long.");

    let listed = app.server.get(&comments).await;
    assert_eq!(listed.json::<Value>()["count"], 1);

    app.server
        .delete(&format!("/api/v1/titles/{}/", title.id))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&comments)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/api/v1/titles/{}/reviews/", title.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let db = &app.state.db;
    assert_eq!(reviews::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(comments::Entity::find().count(db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_limit_comment_edits_to_author_and_elevated_roles() {
    let app = test_app().await;
    let (_, admin) = app.seed_user("root", UserRole::Admin).await;
    let (_, moderator) = app.seed_user("mod", UserRole::Moderator).await;
    let (_, alice) = app.seed_user("alice", UserRole::User).await;
    let (_, bob) = app.seed_user("bob", UserRole::User).await;
    let title = app.seed_title("Solaris", 1972, None, vec![]).await;

    let review = app
        .server
        .post(&format!("/api/v1/titles/{}/reviews/", title.id))
        .authorization_bearer(&alice)
        .json(&json!({"text": "Long.", "score": 9}))
        .await
        .json::<Value>();
    let comments_path = format!(
        "/api/v1/titles/{}/reviews/{}/comments/",
        title.id,
        review["id"].as_i64().unwrap()
    );
    let comment = app
        .server
        .post(&comments_path)
        .authorization_bearer(&alice)
        .json(&json!({"text": "First."}))
        .await
        .json::<Value>();
    let path = format!("{comments_path}{}/", comment["id"].as_i64().unwrap());

    app.server
        .patch(&path)
        .authorization_bearer(&bob)
        .json(&json!({"text": "Hijacked."}))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&path)
        .authorization_bearer(&bob)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .patch(&path)
        .json(&json!({"text": "Anonymous."}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let resp = app
        .server
        .patch(&path)
        .authorization_bearer(&alice)
        .json(&json!({"text": "Edited."}))
        .await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>()["text"], "Edited.");

    let resp = app
        .server
        .patch(&path)
        .authorization_bearer(&moderator)
        .json(&json!({"text": "Moderated."}))
        .await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["text"], "Moderated.");
    assert_eq!(body["author"], "alice");

    app.server
        .delete(&path)
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_map_duplicate_review_row_to_validation_error() {
    let app = test_app().await;
    let (alice, _) = app.seed_user("alice", UserRole::User).await;
    let title = app.seed_title("Solaris", 1972, None, vec![]).await;
    let repo = app.state.review_repo();

    repo.create(title.id, alice.id, "First.", 7).await.unwrap();
    let result = repo.create(title.id, alice.id, "Second.", 3).await;

    match result {
        Err(ApiError::Validation(errors)) => assert!(errors.contains(NON_FIELD_ERRORS)),
        other => panic!("expected Validation, got {:?}", other.err()),
    }
    assert_eq!(reviews::Entity::find().count(&app.state.db).await.unwrap(), 1);
}

// ── Search and query parsing ─────────────────────────────────────────────────

#[tokio::test]
async fn should_match_cyrillic_names_case_insensitively() {
    let app = test_app().await;
    app.seed_title("Ёлка", 2010, None, vec![]).await;
    app.seed_title("Matrix", 1999, None, vec![]).await;
    app.seed_category("Фильм", "film").await;
    app.seed_genre("Драма", "drama").await;

    for needle in ["Ёлка", "ёлка", "ЁЛКА", "лк"] {
        let resp = app
            .server
            .get(&format!("/api/v1/titles/?name={}", encoded(needle)))
            .await;
        resp.assert_status_ok();
        let body = resp.json::<Value>();
        assert_eq!(body["count"], 1, "name={needle}");
        assert_eq!(body["results"][0]["name"], "Ёлка");
    }

    let resp = app.server.get("/api/v1/titles/?name=MATRIX").await;
    assert_eq!(resp.json::<Value>()["count"], 1);

    let resp = app
        .server
        .get(&format!("/api/v1/categories/?search={}", encoded("Фильм")))
        .await;
    assert_eq!(resp.json::<Value>()["count"], 1);

    let resp = app
        .server
        .get(&format!("/api/v1/genres/?search={}", encoded("дРАМ")))
        .await;
    let body = resp.json::<Value>();
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["slug"], "drama");
}

#[tokio::test]
async fn should_match_cyrillic_name_after_rename() {
    let app = test_app().await;
    let (_, admin) = app.seed_user("root", UserRole::Admin).await;
    let title = app.seed_title("Matrix", 1999, None, vec![]).await;

    app.server
        .patch(&format!("/api/v1/titles/{}/", title.id))
        .authorization_bearer(&admin)
        .json(&json!({"name": "Матрица"}))
        .await
        .assert_status_ok();

    let resp = app
        .server
        .get(&format!("/api/v1/titles/?name={}", encoded("матрица")))
        .await;
    assert_eq!(resp.json::<Value>()["count"], 1);
    let resp = app.server.get("/api/v1/titles/?name=matrix").await;
    assert_eq!(resp.json::<Value>()["count"], 0);
}

#[tokio::test]
async fn should_search_users_and_taxonomies() {
    let app = test_app().await;
    let (_, admin) = app.seed_user("root", UserRole::Admin).await;
    app.seed_user("alice", UserRole::User).await;
    app.seed_user("malice", UserRole::User).await;
    app.seed_category("Films", "films").await;
    app.seed_category("Books", "books").await;
    app.seed_genre("Drama", "drama").await;
    app.seed_genre("Comedy", "comedy").await;

    let resp = app
        .server
        .get("/api/v1/users/?search=ALI")
        .authorization_bearer(&admin)
        .await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["count"], 2);
    assert_eq!(body["results"][0]["username"], "alice");
    assert_eq!(body["results"][1]["username"], "malice");

    let resp = app.server.get("/api/v1/categories/?search=film").await;
    let body = resp.json::<Value>();
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["slug"], "films");

    let resp = app.server.get("/api/v1/genres/?search=MED").await;
    let body = resp.json::<Value>();
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["slug"], "comedy");

    let resp = app.server.get("/api/v1/genres/?search=").await;
    assert_eq!(resp.json::<Value>()["count"], 2);
}

#[tokio::test]
async fn should_ignore_empty_numeric_query_values() {
    let app = test_app().await;
    app.seed_title("Matrix", 1999, None, vec![]).await;
    app.seed_title("Solaris", 1972, None, vec![]).await;

    let resp = app.server.get("/api/v1/titles/?name=Mat&year=").await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "Matrix");

    let resp = app.server.get("/api/v1/titles/?limit=&offset=").await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["count"], 2);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    app.server
        .get("/api/v1/categories/?limit=")
        .await
        .assert_status_ok();
}
