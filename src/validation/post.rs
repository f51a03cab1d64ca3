use super::{is_blank, length_between, FieldErrors};
use crate::models::PostRequest;

/// Shared by posts and comments.
pub fn validate_post(input: &PostRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !length_between(input.text.trim(), 10, 300) {
        errors.add("text", "Post must be between 10 and 300 characters");
    }
    if is_blank(&input.text) {
        errors.add("text", "Text field is required");
    }

    errors
}
