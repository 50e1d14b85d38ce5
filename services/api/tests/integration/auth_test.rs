use yamdb_api::error::ApiError;
use yamdb_api::usecase::auth::{
    CreateSuperuserUseCase, SignupInput, SignupUseCase, TokenInput, TokenUseCase,
};
use yamdb_auth_types::token::validate_access_token;
use yamdb_domain::user::UserRole;
use yamdb_testing::auth::TEST_SECRET;

use crate::helpers::{MockMailer, MockUserRepo, code_from_body, test_user};

fn signup(users: MockUserRepo, mailer: MockMailer) -> SignupUseCase<MockUserRepo, MockMailer> {
    SignupUseCase {
        users,
        mailer,
        secret: TEST_SECRET.to_owned(),
        mail_from: "yamdb@example.com".to_owned(),
        public_host: "testserver".to_owned(),
    }
}

fn signup_input(username: &str, email: &str) -> SignupInput {
    SignupInput {
        username: Some(username.to_owned()),
        email: Some(email.to_owned()),
    }
}

fn token_usecase(users: MockUserRepo) -> TokenUseCase<MockUserRepo> {
    TokenUseCase {
        users,
        secret: TEST_SECRET.to_owned(),
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_user_and_mail_confirmation_code() {
    let users = MockUserRepo::empty();
    let mailer = MockMailer::default();
    let sent = mailer.sent_handle();
    let handle = users.users_handle();

    let out = signup(users, mailer)
        .execute(signup_input("bob", "bob@example.com"))
        .await
        .unwrap();

    assert_eq!(out.username, "bob");
    assert_eq!(out.email, "bob@example.com");

    let stored = handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].role, UserRole::User);

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "bob@example.com");
    assert_eq!(sent[0].from, "yamdb@example.com");
    assert!(sent[0].body.contains("http://testserver/api/v1/auth/token/"));
}

#[tokio::test]
async fn should_reuse_user_on_repeated_signup() {
    let users = MockUserRepo::empty();
    let mailer = MockMailer::default();
    let sent = mailer.sent_handle();
    let handle = users.users_handle();
    let usecase = signup(users, mailer);

    usecase
        .execute(signup_input("bob", "bob@example.com"))
        .await
        .unwrap();
    usecase
        .execute(signup_input("bob", "bob@example.com"))
        .await
        .unwrap();

    assert_eq!(handle.lock().unwrap().len(), 1);
    assert_eq!(sent.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_reject_email_bound_to_another_user() {
    let users = MockUserRepo::new(vec![test_user(1, "alice", UserRole::User)]);
    let result = signup(users, MockMailer::default())
        .execute(signup_input("bob", "alice@example.com"))
        .await;

    match result {
        Err(ApiError::Validation(errors)) => {
            assert!(errors.contains("email"));
            assert!(!errors.contains("username"));
        }
        other => panic!("expected Validation, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn should_reject_missing_signup_fields() {
    let result = signup(MockUserRepo::empty(), MockMailer::default())
        .execute(SignupInput {
            username: None,
            email: None,
        })
        .await;

    match result {
        Err(ApiError::Validation(errors)) => {
            assert!(errors.contains("username"));
            assert!(errors.contains("email"));
        }
        other => panic!("expected Validation, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn should_succeed_when_mail_delivery_fails() {
    let users = MockUserRepo::empty();
    let handle = users.users_handle();

    let out = signup(users, MockMailer::failing())
        .execute(signup_input("bob", "bob@example.com"))
        .await
        .unwrap();

    assert_eq!(out.username, "bob");
    assert_eq!(handle.lock().unwrap().len(), 1);
}

// ── Token exchange ───────────────────────────────────────────────────────────

async fn signed_up_code(users: &MockUserRepo) -> String {
    let mailer = MockMailer::default();
    let sent = mailer.sent_handle();
    signup(users.clone(), mailer)
        .execute(signup_input("bob", "bob@example.com"))
        .await
        .unwrap();
    let body = sent.lock().unwrap()[0].body.clone();
    code_from_body(&body)
}

#[tokio::test]
async fn should_exchange_code_for_token_exactly_once() {
    let users = MockUserRepo::empty();
    let code = signed_up_code(&users).await;
    let usecase = token_usecase(users.clone());

    let token = usecase
        .execute(TokenInput {
            username: Some("bob".to_owned()),
            confirmation_code: Some(code.clone()),
        })
        .await
        .unwrap();

    let info = validate_access_token(&token, TEST_SECRET).unwrap();
    assert_eq!(info.user_id, 1);
    assert_eq!(info.role, "user");
    assert!(users.users_handle().lock().unwrap()[0].is_confirmed);

    let replay = usecase
        .execute(TokenInput {
            username: Some("bob".to_owned()),
            confirmation_code: Some(code),
        })
        .await;
    assert!(
        matches!(replay, Err(ApiError::InvalidConfirmationCode)),
        "expected InvalidConfirmationCode on replay, got {:?}",
        replay.err()
    );
}

#[tokio::test]
async fn should_reject_wrong_confirmation_code() {
    let users = MockUserRepo::empty();
    signed_up_code(&users).await;

    let result = token_usecase(users)
        .execute(TokenInput {
            username: Some("bob".to_owned()),
            confirmation_code: Some("not-the-code".to_owned()),
        })
        .await;
    assert!(
        matches!(result, Err(ApiError::InvalidConfirmationCode)),
        "expected InvalidConfirmationCode, got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_username() {
    let result = token_usecase(MockUserRepo::empty())
        .execute(TokenInput {
            username: Some("ghost".to_owned()),
            confirmation_code: Some("whatever".to_owned()),
        })
        .await;
    assert!(
        matches!(result, Err(ApiError::UserNotFound)),
        "expected UserNotFound, got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn should_require_confirmation_code_field() {
    let result = token_usecase(MockUserRepo::empty())
        .execute(TokenInput {
            username: Some("bob".to_owned()),
            confirmation_code: None,
        })
        .await;
    match result {
        Err(ApiError::Validation(errors)) => assert!(errors.contains("confirmation_code")),
        other => panic!("expected Validation, got {:?}", other.err()),
    }
}

// ── Superuser bootstrap ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_promote_existing_user_to_superuser() {
    let users = MockUserRepo::new(vec![test_user(1, "root", UserRole::User)]);
    let usecase = CreateSuperuserUseCase {
        users: users.clone(),
        secret: TEST_SECRET.to_owned(),
    };

    let (user, code) = usecase.execute("root", "root@example.com").await.unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.role, UserRole::Admin);
    assert!(user.is_superuser);
    assert!(!code.is_empty());
    assert_eq!(users.users_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_create_superuser_when_absent() {
    let users = MockUserRepo::empty();
    let usecase = CreateSuperuserUseCase {
        users: users.clone(),
        secret: TEST_SECRET.to_owned(),
    };

    let (user, _) = usecase.execute("root", "root@example.com").await.unwrap();

    assert!(user.is_admin());
    assert!(user.is_superuser);
}
