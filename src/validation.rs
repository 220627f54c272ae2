//! Field and form validation for contact input.
//!
//! Validation never fails with an `Err`: the result is a [`FieldErrors`] map
//! that is empty exactly when the input may be submitted.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::contact::{ContactInput, Field};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 255;
pub const PHONE_MIN_LEN: usize = 10;
pub const MESSAGE_MAX_LEN: usize = 1000;

/// Field name to the first rule it failed. A missing key means the field is valid.
pub type FieldErrors = BTreeMap<Field, &'static str>;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

// Optional `+`, optional country code, optionally parenthesized group,
// then 1-4 / 1-4 / 1-9 digit groups with optional `-` or `.` separators.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?(?:[0-9]{1,4}[-.]?)?\(?[0-9]{1,4}\)?[-.]?[0-9]{1,4}[-.]?[0-9]{1,9}$")
        .expect("phone pattern")
});

/// Shape check only: one `@`, something on both sides, and a dotted domain.
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

/// Shape check only. Accepts plenty of numbers no carrier would route.
pub fn is_valid_phone(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.chars().count() >= PHONE_MIN_LEN && PHONE_RE.is_match(&compact)
}

/// Validates the required fields of a contact. `message` is never checked here.
pub fn validate(input: &ContactInput) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(err) = name_error(input.name.trim()) {
        errors.insert(Field::Name, err);
    }
    if let Some(err) = email_error(input.email.trim()) {
        errors.insert(Field::Email, err);
    }
    if let Some(err) = phone_error(input.phone.trim()) {
        errors.insert(Field::Phone, err);
    }

    errors
}

pub fn is_valid(errors: &FieldErrors) -> bool {
    errors.is_empty()
}

fn name_error(name: &str) -> Option<&'static str> {
    let len = name.chars().count();
    if name.is_empty() {
        Some("Name is required")
    } else if len < NAME_MIN_LEN {
        Some("Name must be at least 2 characters")
    } else if len > NAME_MAX_LEN {
        Some("Name must be less than 100 characters")
    } else {
        None
    }
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Please enter a valid email address")
    } else if email.chars().count() > EMAIL_MAX_LEN {
        Some("Email must be less than 255 characters")
    } else {
        None
    }
}

fn phone_error(phone: &str) -> Option<&'static str> {
    if phone.is_empty() {
        Some("Phone number is required")
    } else if !is_valid_phone(phone) {
        Some("Please enter a valid phone number")
    } else {
        None
    }
}
