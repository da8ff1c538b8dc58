//! Field validators.
//!
//! Pure, synchronous predicates used identically by the registration and
//! login forms for inline feedback. Deterministic, no state, no I/O; the
//! caller trims input before validating.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Message attached to a too-short password.
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "Password must be at least 6 characters long";

/// Minimum display-name length after trimming.
pub const NAME_MIN_CHARS: usize = 2;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Checks email syntax.
///
/// Rejects the empty string, a leading or trailing dot, consecutive dots,
/// any whitespace, `@.`, `.@`, and `@@`; what survives must match a local
/// part of `[A-Za-z0-9._%+-]`, an `@`, a domain of `[A-Za-z0-9.-]`, and a
/// top-level domain of two or more letters.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() {
        return false;
    }

    let obviously_invalid = email.starts_with('.')
        || email.ends_with('.')
        || email.contains("..")
        || email.chars().any(char::is_whitespace)
        || email.contains("@.")
        || email.contains(".@")
        || email.contains("@@");
    if obviously_invalid {
        return false;
    }

    EMAIL_RE.is_match(email)
}

/// Outcome of a password check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordValidation {
    pub is_valid: bool,
    /// Present only when invalid; ready for inline display.
    pub message: Option<&'static str>,
}

/// Checks the password length requirement.
///
/// Fewer than [`PASSWORD_MIN_CHARS`] characters fails with
/// [`PASSWORD_TOO_SHORT_MESSAGE`]. There is no upper bound and no
/// character-class requirement.
pub fn validate_password(password: &str) -> PasswordValidation {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return PasswordValidation {
            is_valid: false,
            message: Some(PASSWORD_TOO_SHORT_MESSAGE),
        };
    }
    PasswordValidation {
        is_valid: true,
        message: None,
    }
}

/// Outcome of a display-name check.
///
/// Invalid variants carry the stable message key the presentation layer
/// resolves against its string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidation {
    Valid,
    /// Empty after trimming.
    Empty,
    /// Shorter than [`NAME_MIN_CHARS`] after trimming.
    TooShort,
}

impl NameValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Stable identifier for message lookup, `None` when valid.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Empty => Some("name_required"),
            Self::TooShort => Some("name_short"),
        }
    }
}

/// Checks the display-name requirement.
///
/// Trimming here is only for judging; the stored name stays the caller's
/// string.
pub fn validate_name(name: &str) -> NameValidation {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return NameValidation::Empty;
    }
    if trimmed.chars().count() < NAME_MIN_CHARS {
        return NameValidation::TooShort;
    }
    NameValidation::Valid
}
