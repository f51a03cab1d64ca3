use super::{is_blank, is_url, length_between, parse_date, FieldErrors};
use crate::models::{split_skills, EducationRequest, ExperienceRequest, ProfileRequest};

pub fn validate_profile(input: &ProfileRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !length_between(input.handle.trim(), 2, 40) {
        errors.add("handle", "Handle needs to be between 2 and 40 characters");
    }
    if is_blank(&input.handle) {
        errors.add("handle", "Profile handle is required");
    }
    if is_blank(&input.status) {
        errors.add("status", "Status field is required");
    }
    if split_skills(&input.skills).is_empty() {
        errors.add("skills", "Skills field is required");
    }

    let links = [
        ("website", &input.website),
        ("youtube", &input.youtube),
        ("twitter", &input.twitter),
        ("facebook", &input.facebook),
        ("linkedin", &input.linkedin),
        ("instagram", &input.instagram),
    ];
    for (field, value) in links {
        if !is_blank(value) && !is_url(value) {
            errors.add(field, "Not a valid URL");
        }
    }

    errors
}

pub fn validate_experience(input: &ExperienceRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&input.title) {
        errors.add("title", "Job title field is required");
    }
    if is_blank(&input.company) {
        errors.add("company", "Company field is required");
    }
    check_dates(&mut errors, &input.from, &input.to);

    errors
}

pub fn validate_education(input: &EducationRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&input.school) {
        errors.add("school", "School field is required");
    }
    if is_blank(&input.degree) {
        errors.add("degree", "Degree field is required");
    }
    if is_blank(&input.fieldofstudy) {
        errors.add("fieldofstudy", "Field of study field is required");
    }
    check_dates(&mut errors, &input.from, &input.to);

    errors
}

fn check_dates(errors: &mut FieldErrors, from: &str, to: &str) {
    if is_blank(from) {
        errors.add("from", "From date field is required");
    } else if parse_date(from).is_none() {
        errors.add("from", "From date is invalid");
    }
    if !is_blank(to) && parse_date(to).is_none() {
        errors.add("to", "To date is invalid");
    }
}
