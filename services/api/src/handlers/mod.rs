pub mod auth;
pub mod comments;
pub mod extract;
pub mod health;
pub mod pagination;
pub mod reviews;
pub mod taxonomy;
pub mod titles;
pub mod users;
