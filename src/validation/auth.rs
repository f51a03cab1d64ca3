use super::{is_blank, is_email, length_between, FieldErrors};
use crate::models::{LoginRequest, RegisterRequest};

pub fn validate_register(input: &RegisterRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !length_between(input.name.trim(), 1, 30) {
        errors.add("name", "Name must be at most 30 characters");
    }
    if is_blank(&input.name) {
        errors.add("name", "Name field is required");
    }

    if !is_email(&input.email) {
        errors.add("email", "Email is invalid");
    }
    if is_blank(&input.email) {
        errors.add("email", "Email field is required");
    }

    if !length_between(&input.password, 6, 30) {
        errors.add("password", "Password must be between 6 and 30 characters");
    }
    if is_blank(&input.password) {
        errors.add("password", "Password field is required");
    }

    if input.password != input.password2 {
        errors.add("password2", "Passwords must match");
    }
    if is_blank(&input.password2) {
        errors.add("password2", "Confirm Password field is required");
    }

    errors
}

pub fn validate_login(input: &LoginRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !is_email(&input.email) {
        errors.add("email", "Email is invalid");
    }
    if is_blank(&input.email) {
        errors.add("email", "Email field is required");
    }
    if is_blank(&input.password) {
        errors.add("password", "Password field is required");
    }

    errors
}
