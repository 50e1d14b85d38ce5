//! Auth types shared across YaMDb crates.
//!
//! Provides signed-token issue/validation and `Authorization: Bearer` header parsing.

pub mod bearer;
pub mod token;
