//! Access rules.
//!
//! | Resource | Read | Create | Update / Delete |
//! |---|---|---|---|
//! | `Users` | admin | admin | admin |
//! | `OwnProfile` | authenticated | - | authenticated |
//! | `Catalog` | anyone | admin | admin |
//! | `Discussion` | anyone | authenticated | - |
//! | `Post` | anyone | authenticated | author, moderator, admin |

use crate::domain::types::User;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The user administration collection.
    Users,
    /// The caller's own account.
    OwnProfile,
    /// Categories, genres and titles.
    Catalog,
    /// A review or comment collection.
    Discussion,
    /// One review or comment.
    Post { author_id: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

/// Decide whether `principal` may perform `action` on `resource`.
///
/// Anonymous callers denied anything get `AuthenticationRequired`;
/// authenticated callers get `Forbidden`.
pub fn authorize(
    principal: Option<&User>,
    resource: Resource,
    action: Action,
) -> Result<(), ApiError> {
    let open_read = matches!(
        resource,
        Resource::Catalog | Resource::Discussion | Resource::Post { .. }
    );
    if action == Action::Read && open_read {
        return Ok(());
    }

    let user = principal.ok_or(ApiError::AuthenticationRequired)?;
    let allowed = match resource {
        Resource::Users | Resource::Catalog => user.is_admin(),
        Resource::OwnProfile | Resource::Discussion => true,
        Resource::Post { author_id } => {
            action == Action::Create
                || author_id == user.id
                || user.is_moderator()
                || user.is_admin()
        }
    };
    if allowed { Ok(()) } else { Err(ApiError::Forbidden) }
}

/// Require an authenticated principal.
pub fn require_user(principal: Option<&User>) -> Result<&User, ApiError> {
    principal.ok_or(ApiError::AuthenticationRequired)
}
