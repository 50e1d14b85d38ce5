use yamdb_core::error::FieldErrors;
use yamdb_domain::pagination::PageRequest;
use yamdb_domain::user::UserRole;

use crate::domain::policy::{Action, Resource, authorize, require_user};
use crate::domain::repository::UserRepository;
use crate::domain::types::{Listing, NewUser, User, UserPatch};
use crate::domain::validation::{
    PERSON_NAME_MAX_LEN, REQUIRED, max_len, validate_email, validate_username,
};
use crate::error::ApiError;

/// User fields as submitted; absent fields are `None`.
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

/// Check every present field, plus username/email uniqueness against users
/// other than `current`. `errors` may already hold messages from the caller.
async fn validate_input<U: UserRepository>(
    users: &U,
    input: &UserInput,
    current: Option<i32>,
    mut errors: FieldErrors,
) -> Result<UserPatch, ApiError> {
    if let Some(ref username) = input.username {
        errors.check("username", validate_username(username));
    }
    if let Some(ref email) = input.email {
        errors.check("email", validate_email(email));
    }
    if let Some(ref first_name) = input.first_name {
        errors.check("first_name", max_len(first_name, PERSON_NAME_MAX_LEN));
    }
    if let Some(ref last_name) = input.last_name {
        errors.check("last_name", max_len(last_name, PERSON_NAME_MAX_LEN));
    }
    let role = match input.role.as_deref().map(str::parse::<UserRole>) {
        None => None,
        Some(Ok(role)) => Some(role),
        Some(Err(e)) => {
            errors.add("role", format!("\"{}\" is not a valid choice.", e.0));
            None
        }
    };

    if !errors.contains("username") {
        if let Some(ref username) = input.username {
            if let Some(other) = users.find_by_username(username).await? {
                if Some(other.id) != current {
                    errors.add("username", "A user with that username already exists.");
                }
            }
        }
    }
    if !errors.contains("email") {
        if let Some(ref email) = input.email {
            if let Some(other) = users.find_by_email(email).await? {
                if Some(other.id) != current {
                    errors.add("email", "A user with that email already exists.");
                }
            }
        }
    }
    errors.into_result()?;

    Ok(UserPatch {
        username: input.username.clone(),
        email: input.email.clone(),
        first_name: input.first_name.clone(),
        last_name: input.last_name.clone(),
        bio: input.bio.clone(),
        role,
    })
}

// ── Admin collection ─────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        principal: Option<&User>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Listing<User>, ApiError> {
        authorize(principal, Resource::Users, Action::Read)?;
        self.users.list(search, page).await
    }
}

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(
        &self,
        principal: Option<&User>,
        username: &str,
    ) -> Result<User, ApiError> {
        authorize(principal, Resource::Users, Action::Read)?;
        self.users
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(
        &self,
        principal: Option<&User>,
        input: UserInput,
    ) -> Result<User, ApiError> {
        authorize(principal, Resource::Users, Action::Create)?;

        let mut missing = FieldErrors::new();
        if input.username.is_none() {
            missing.add("username", REQUIRED);
        }
        if input.email.is_none() {
            missing.add("email", REQUIRED);
        }
        let patch = validate_input(&self.users, &input, None, missing).await?;

        self.users
            .create(&NewUser {
                username: patch.username.unwrap_or_default(),
                email: patch.email.unwrap_or_default(),
                first_name: patch.first_name.unwrap_or_default(),
                last_name: patch.last_name.unwrap_or_default(),
                bio: patch.bio.unwrap_or_default(),
                role: patch.role.unwrap_or_default(),
                is_superuser: false,
            })
            .await
    }
}

pub struct UpdateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateUserUseCase<U> {
    pub async fn execute(
        &self,
        principal: Option<&User>,
        username: &str,
        input: UserInput,
    ) -> Result<User, ApiError> {
        authorize(principal, Resource::Users, Action::Update)?;
        let target = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let patch =
            validate_input(&self.users, &input, Some(target.id), FieldErrors::new()).await?;
        self.users.update(target.id, &patch).await
    }
}

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    pub async fn execute(
        &self,
        principal: Option<&User>,
        username: &str,
    ) -> Result<(), ApiError> {
        authorize(principal, Resource::Users, Action::Delete)?;
        let target = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !self.users.delete(target.id).await? {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }
}

// ── Own profile ──────────────────────────────────────────────────────────────

pub struct GetMeUseCase;

impl GetMeUseCase {
    pub fn execute(principal: Option<&User>) -> Result<User, ApiError> {
        authorize(principal, Resource::OwnProfile, Action::Read)?;
        Ok(require_user(principal)?.clone())
    }
}

pub struct UpdateMeUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateMeUseCase<U> {
    /// `role` is read-only here and silently dropped.
    pub async fn execute(
        &self,
        principal: Option<&User>,
        mut input: UserInput,
    ) -> Result<User, ApiError> {
        authorize(principal, Resource::OwnProfile, Action::Update)?;
        let me = require_user(principal)?;
        input.role = None;
        let patch =
            validate_input(&self.users, &input, Some(me.id), FieldErrors::new()).await?;
        self.users.update(me.id, &patch).await
    }
}
