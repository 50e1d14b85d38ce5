use anyhow::Context as _;
use yamdb_auth_types::token::issue_access_token;
use yamdb_core::error::FieldErrors;
use yamdb_domain::user::UserRole;

use crate::domain::confirmation::{check_confirmation_code, issue_confirmation_code};
use crate::domain::repository::{MailPort, UserRepository};
use crate::domain::types::{MailMessage, NewUser, User};
use crate::domain::validation::{REQUIRED, not_blank, validate_email, validate_username};
use crate::error::ApiError;

pub const CONFIRMATION_SUBJECT: &str = "Confirmation code for obtaining a YaMDb token";

const USERNAME_TAKEN: &str = "A user with that username already exists.";
const EMAIL_TAKEN: &str = "A user with that email already exists.";

fn confirmation_body(public_host: &str, username: &str, code: &str) -> String {
    format!(
        "To obtain a YaMDb access token send a POST request to:\n\
         http://{public_host}/api/v1/auth/token/\n\
         with the parameters\n\
         {{\n  \"username\": \"{username}\",\n  \"confirmation_code\": \"{code}\"\n}}"
    )
}

/// Validate username + email shared by signup and the superuser command.
fn check_identity(
    username: Option<&str>,
    email: Option<&str>,
) -> Result<(String, String), ApiError> {
    let mut errors = FieldErrors::new();
    match username {
        None => errors.add("username", REQUIRED),
        Some(u) => errors.check("username", validate_username(u)),
    }
    match email {
        None => errors.add("email", REQUIRED),
        Some(e) => errors.check("email", validate_email(e)),
    }
    errors.into_result()?;
    Ok((
        username.unwrap_or_default().to_owned(),
        email.unwrap_or_default().to_owned(),
    ))
}

/// Find the user owning exactly this username + email, or create one.
///
/// A username or email already bound to a different identity is a field error.
async fn get_or_create<U: UserRepository>(
    users: &U,
    username: &str,
    email: &str,
    template: NewUser,
) -> Result<User, ApiError> {
    let by_username = users.find_by_username(username).await?;
    let by_email = users.find_by_email(email).await?;
    match (by_username, by_email) {
        (Some(u), Some(e)) if u.id == e.id => Ok(u),
        (by_username, by_email) => {
            let mut errors = FieldErrors::new();
            if by_username.is_some() {
                errors.add("username", USERNAME_TAKEN);
            }
            if by_email.is_some() {
                errors.add("email", EMAIL_TAKEN);
            }
            errors.into_result()?;
            users
                .create(&NewUser {
                    username: username.to_owned(),
                    email: email.to_owned(),
                    ..template
                })
                .await
        }
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub username: Option<String>,
    pub email: Option<String>,
}

pub struct SignupOutput {
    pub username: String,
    pub email: String,
}

pub struct SignupUseCase<U, M>
where
    U: UserRepository,
    M: MailPort,
{
    pub users: U,
    pub mailer: M,
    pub secret: String,
    pub mail_from: String,
    pub public_host: String,
}

impl<U, M> SignupUseCase<U, M>
where
    U: UserRepository,
    M: MailPort,
{
    pub async fn execute(&self, input: SignupInput) -> Result<SignupOutput, ApiError> {
        let (username, email) =
            check_identity(input.username.as_deref(), input.email.as_deref())?;

        let user = get_or_create(&self.users, &username, &email, NewUser::default()).await?;
        let code = issue_confirmation_code(&user, &self.secret)
            .context("issue confirmation code")?;

        let message = MailMessage {
            from: self.mail_from.clone(),
            to: user.email.clone(),
            subject: CONFIRMATION_SUBJECT.to_owned(),
            body: confirmation_body(&self.public_host, &user.username, &code),
        };
        // Delivery is best-effort; repeating signup re-sends the code.
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(user_id = user.id, error = ?e, "confirmation mail not delivered");
        }
        tracing::info!(user_id = user.id, "confirmation code issued");

        Ok(SignupOutput {
            username: user.username,
            email: user.email,
        })
    }
}

// ── Token exchange ───────────────────────────────────────────────────────────

pub struct TokenInput {
    pub username: Option<String>,
    pub confirmation_code: Option<String>,
}

pub struct TokenUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
    pub secret: String,
}

impl<U> TokenUseCase<U>
where
    U: UserRepository,
{
    /// Exchange a confirmation code for an access token. Each code works once.
    pub async fn execute(&self, input: TokenInput) -> Result<String, ApiError> {
        let mut errors = FieldErrors::new();
        match input.username.as_deref() {
            None => errors.add("username", REQUIRED),
            Some(u) => errors.check("username", validate_username(u)),
        }
        match input.confirmation_code.as_deref() {
            None => errors.add("confirmation_code", REQUIRED),
            Some(c) => errors.check("confirmation_code", not_blank(c)),
        }
        errors.into_result()?;
        let username = input.username.unwrap_or_default();
        let code = input.confirmation_code.unwrap_or_default();

        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if !check_confirmation_code(&user, &code, &self.secret) {
            return Err(ApiError::InvalidConfirmationCode);
        }
        // Lost race: a concurrent exchange already used this code.
        if !self
            .users
            .consume_confirmation(user.id, user.confirmation_version)
            .await?
        {
            return Err(ApiError::InvalidConfirmationCode);
        }

        let (token, _) = issue_access_token(user.id, user.role.as_str(), &self.secret)
            .context("issue access token")?;
        Ok(token)
    }
}

// ── Superuser bootstrap ──────────────────────────────────────────────────────

pub struct CreateSuperuserUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
    pub secret: String,
}

impl<U> CreateSuperuserUseCase<U>
where
    U: UserRepository,
{
    /// Create (or promote) a superuser and return a confirmation code for it.
    pub async fn execute(
        &self,
        username: &str,
        email: &str,
    ) -> Result<(User, String), ApiError> {
        let (username, email) = check_identity(Some(username), Some(email))?;
        let template = NewUser {
            role: UserRole::Admin,
            is_superuser: true,
            ..NewUser::default()
        };
        let user = get_or_create(&self.users, &username, &email, template).await?;
        let user = if user.is_superuser && user.role == UserRole::Admin {
            user
        } else {
            self.users.promote_superuser(user.id).await?
        };
        let code = issue_confirmation_code(&user, &self.secret)
            .context("issue confirmation code")?;
        Ok((user, code))
    }
}
