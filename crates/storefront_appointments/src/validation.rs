// --- File: crates/storefront_appointments/src/validation.rs ---
//! Contact-detail validation for the booking form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const MIN_NAME_LENGTH: usize = 3;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{8,15}$").expect("phone regex"));

/// Contact form state. Notes are free text and never validated.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AppointmentDetails {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Ana García"))]
    pub name: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "ana@example.com"))]
    pub email: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "+34 600 123 456"))]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

impl AppointmentDetails {
    /// True once name, email and phone hold something.
    pub fn is_filled(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

/// Field name to message.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_LENGTH
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Spaces, dashes, dots and parentheses are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&digits)
}

/// Validates every field and reports all failures at once.
pub fn validate_details(details: &AppointmentDetails) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !is_valid_name(&details.name) {
        errors.add(
            "name",
            format!("Name must be at least {} characters", MIN_NAME_LENGTH),
        );
    }
    if !is_valid_email(&details.email) {
        errors.add("email", "Enter a valid email address");
    }
    if !is_valid_phone(&details.phone) {
        errors.add("phone", "Enter a valid phone number (8 to 15 digits)");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
