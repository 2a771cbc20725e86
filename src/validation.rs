//! Form checks that run before any request is sent.

use crate::error::FieldErrors;
use crate::models::NewListing;
use validator::{Validate, ValidationErrors};

/// What the sign-up page submits
#[derive(Debug, Clone, Validate)]
pub struct SignUpForm {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Collect every problem with the form, one message per field
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Err(found) = self.validate() {
            merge(&mut errors, &found);
        }

        if !self.password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.add("password", "Password must contain at least one uppercase letter");
        }
        if !self.password.chars().any(|c| c.is_ascii_digit()) {
            errors.add("password", "Password must contain at least one number");
        }
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords must match");
        }
        errors
    }
}

/// Check a listing before it is posted
pub fn check_new_listing(listing: &NewListing) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Err(found) = listing.validate() {
        merge(&mut errors, &found);
    }
    if listing.title.trim().is_empty() {
        errors.add("title", "Title is required");
    }
    if listing.location.trim().is_empty() {
        errors.add("location", "Location is required");
    }
    match listing.price_per_night.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => {}
        _ => errors.add("price_per_night", "Price per night must be a non-negative number"),
    }
    errors
}

fn merge(into: &mut FieldErrors, found: &ValidationErrors) {
    for (field, errs) in found.field_errors() {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            into.add(field.to_string(), message);
        }
    }
}
