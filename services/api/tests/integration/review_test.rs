use yamdb_api::error::ApiError;
use yamdb_api::usecase::review::{
    CreateReviewUseCase, DeleteReviewUseCase, ReviewInput, UpdateReviewUseCase,
};
use yamdb_core::error::NON_FIELD_ERRORS;
use yamdb_domain::user::UserRole;

use crate::helpers::{MockReviewRepo, MockTitleRepo, test_review, test_user};

fn input(text: &str, score: i32) -> ReviewInput {
    ReviewInput {
        text: Some(text.to_owned()),
        score: Some(score),
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_review_with_default_score() {
    let author = test_user(1, "alice", UserRole::User);
    let usecase = CreateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[10]),
        reviews: MockReviewRepo::default(),
    };

    let review = usecase
        .execute(
            Some(&author),
            10,
            ReviewInput {
                text: Some("Great.".to_owned()),
                score: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(review.title_id, 10);
    assert_eq!(review.author_id, 1);
    assert_eq!(review.score, 1);
}

#[tokio::test]
async fn should_reject_second_review_by_same_author() {
    let author = test_user(1, "alice", UserRole::User);
    let reviews = MockReviewRepo::new(vec![test_review(1, 10, &author, 8)]);
    let handle = reviews.reviews_handle();
    let usecase = CreateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[10]),
        reviews,
    };

    let result = usecase.execute(Some(&author), 10, input("Again", 5)).await;

    match result {
        Err(ApiError::Validation(errors)) => assert!(errors.contains(NON_FIELD_ERRORS)),
        other => panic!("expected Validation, got {:?}", other.err()),
    }
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_score_out_of_range() {
    let author = test_user(1, "alice", UserRole::User);
    let usecase = CreateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[10]),
        reviews: MockReviewRepo::default(),
    };

    let result = usecase.execute(Some(&author), 10, input("Meh", 11)).await;

    match result {
        Err(ApiError::Validation(errors)) => assert!(errors.contains("score")),
        other => panic!("expected Validation, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn should_return_title_not_found_for_missing_title() {
    let author = test_user(1, "alice", UserRole::User);
    let usecase = CreateReviewUseCase {
        titles: MockTitleRepo::default(),
        reviews: MockReviewRepo::default(),
    };

    let result = usecase.execute(Some(&author), 99, input("Hi", 5)).await;
    assert!(
        matches!(result, Err(ApiError::TitleNotFound)),
        "expected TitleNotFound, got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn should_require_authentication_to_review() {
    let usecase = CreateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[10]),
        reviews: MockReviewRepo::default(),
    };

    let result = usecase.execute(None, 10, input("Hi", 5)).await;
    assert!(
        matches!(result, Err(ApiError::AuthenticationRequired)),
        "expected AuthenticationRequired, got {:?}",
        result.err()
    );
}

// ── Update / delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_update_by_non_author() {
    let author = test_user(1, "alice", UserRole::User);
    let other = test_user(2, "bob", UserRole::User);
    let usecase = UpdateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[10]),
        reviews: MockReviewRepo::new(vec![test_review(1, 10, &author, 8)]),
    };

    let result = usecase.execute(Some(&other), 10, 1, input("Mine now", 2)).await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn should_let_moderator_update_any_review() {
    let author = test_user(1, "alice", UserRole::User);
    let moderator = test_user(2, "mod", UserRole::Moderator);
    let usecase = UpdateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[10]),
        reviews: MockReviewRepo::new(vec![test_review(1, 10, &author, 8)]),
    };

    let review = usecase
        .execute(
            Some(&moderator),
            10,
            1,
            ReviewInput {
                text: Some("Edited".to_owned()),
                score: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(review.text, "Edited");
    assert_eq!(review.score, 8);
    assert_eq!(review.author_id, 1);
}

#[tokio::test]
async fn should_not_find_review_under_another_title() {
    let author = test_user(1, "alice", UserRole::User);
    let usecase = DeleteReviewUseCase {
        titles: MockTitleRepo::with_ids(&[10, 20]),
        reviews: MockReviewRepo::new(vec![test_review(1, 10, &author, 8)]),
    };

    let result = usecase.execute(Some(&author), 20, 1).await;
    assert!(
        matches!(result, Err(ApiError::ReviewNotFound)),
        "expected ReviewNotFound, got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn should_delete_own_review() {
    let author = test_user(1, "alice", UserRole::User);
    let reviews = MockReviewRepo::new(vec![test_review(1, 10, &author, 8)]);
    let handle = reviews.reviews_handle();
    let usecase = DeleteReviewUseCase {
        titles: MockTitleRepo::with_ids(&[10]),
        reviews,
    };

    usecase.execute(Some(&author), 10, 1).await.unwrap();
    assert!(handle.lock().unwrap().is_empty());
}
