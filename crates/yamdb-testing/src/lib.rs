//! Test utilities for YaMDb services.
//!
//! Provides `MockAuth` for minting bearer headers and an in-memory database helper.
//! Import from tests only, never from production code.

pub mod auth;
pub mod db;
