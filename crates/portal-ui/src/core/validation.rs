//! Login form field validation.
//!
//! # Design
//! - Pure functions; callers decide whether to run them per keystroke or per submit.
//! - Each field reports at most one reason, in a fixed check order.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// `local@domain.tld`: non-empty local part, one `@`, dotted domain ending in a 2+ character label.
static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@(?:[^\s@.]+\.)+[^\s@.]{2,}$").ok());

/// Reason a field was rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum ValidationError {
    /// Email does not look like `local@domain.tld`.
    #[error("invalid email format")]
    InvalidFormat,
    /// Password is shorter than [`MIN_PASSWORD_LEN`].
    #[error("password too short")]
    TooShort,
    /// Password lacks a letter or a digit.
    #[error("password must contain both letters and digits")]
    MissingLetterOrDigit,
}

impl ValidationError {
    /// Translation key for the user-facing text.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::InvalidFormat => "validation.invalid_email",
            Self::TooShort => "validation.password_too_short",
            Self::MissingLetterOrDigit => "validation.password_letters_digits",
        }
    }
}

/// Outcome of validating one field.
pub type ValidationResult = Result<(), ValidationError>;

/// Check that `value` is a plausible email address.
///
/// # Errors
/// Returns [`ValidationError::InvalidFormat`] for empty or malformed input.
pub fn validate_email(value: &str) -> ValidationResult {
    let matches = EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value));
    if matches {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat)
    }
}

/// Check password length, then composition.
///
/// # Errors
/// Returns [`ValidationError::TooShort`] below [`MIN_PASSWORD_LEN`] characters, otherwise
/// [`ValidationError::MissingLetterOrDigit`] unless both an ASCII letter and a digit appear.
pub fn validate_password(value: &str) -> ValidationResult {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort);
    }
    let has_letter = value.chars().any(|ch| ch.is_ascii_alphabetic());
    let has_digit = value.chars().any(|ch| ch.is_ascii_digit());
    if has_letter && has_digit {
        Ok(())
    } else {
        Err(ValidationError::MissingLetterOrDigit)
    }
}
