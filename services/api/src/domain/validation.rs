//! Field validation rules.
//!
//! Each rule is a pure function returning the user-facing message on failure;
//! usecases collect them into `FieldErrors`.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::types::{MAX_SCORE, MIN_SCORE};

pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PERSON_NAME_MAX_LEN: usize = 150;
pub const TAXONOMY_NAME_MAX_LEN: usize = 256;
pub const SLUG_MAX_LEN: usize = 50;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";

const RESERVED_USERNAME: &str = "me";

static EMAIL_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+(\.[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+)*$")
        .expect("valid email user regex")
});

static EMAIL_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+(?:[A-Za-z]{2,63}|xn--[A-Za-z0-9]{1,59})$",
    )
    .expect("valid email domain regex")
});

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-A-Za-z0-9_]+$").expect("valid slug regex"));

/// Letters, digits, `_` and `-` only; `me` (any case) is reserved for the
/// self-service profile route.
pub fn validate_username(username: &str) -> Result<(), String> {
    max_len(username, USERNAME_MAX_LEN)?;
    let charset_ok = !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !charset_ok || username.eq_ignore_ascii_case(RESERVED_USERNAME) {
        return Err(format!(
            "Invalid username: only letters, digits, _ and - are allowed, \
             and \"{RESERVED_USERNAME}\" cannot be used."
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    const INVALID: &str = "Enter a valid email address.";
    max_len(email, EMAIL_MAX_LEN)?;
    let Some((user, domain)) = email.rsplit_once('@') else {
        return Err(INVALID.to_owned());
    };
    if !EMAIL_USER.is_match(user) {
        return Err(INVALID.to_owned());
    }
    if domain != "localhost" && !EMAIL_DOMAIN.is_match(domain) {
        return Err(INVALID.to_owned());
    }
    Ok(())
}

pub fn validate_year(year: i32, current_year: i32) -> Result<(), String> {
    if year > current_year {
        return Err(format!(
            "Year cannot be later than the current year ({current_year})."
        ));
    }
    Ok(())
}

pub fn validate_score(score: i32) -> Result<(), String> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}."
        ));
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), String> {
    max_len(slug, SLUG_MAX_LEN)?;
    if !SLUG.is_match(slug) {
        return Err(
            "Enter a valid slug consisting of letters, numbers, underscores or hyphens."
                .to_owned(),
        );
    }
    Ok(())
}

pub fn not_blank(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(BLANK.to_owned());
    }
    Ok(())
}

/// Length in characters, not bytes.
pub fn max_len(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!(
            "Ensure this field has no more than {max} characters."
        ));
    }
    Ok(())
}
