//! Field-level validation of person input

use chrono::NaiveDate;

use crate::age::{parse_date, today};
use crate::limits::{is_valid_place_characters, is_valid_place_length};
use crate::person::PersonInput;
use crate::violation::{Violation, ViolationKind};

/// Validate person fields against today's date
pub fn validate_fields(input: &PersonInput) -> Vec<Violation> {
    validate_fields_on(input, today())
}

/// Validate person fields, treating `today` as the current date.
///
/// Violations come out in field order (name, date of birth, place of birth);
/// each field reports at most one.
pub fn validate_fields_on(input: &PersonInput, today: NaiveDate) -> Vec<Violation> {
    let mut errors: Vec<Violation> = Vec::new();

    let name = input.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        errors.push(ViolationKind::NameRequired.into());
    }

    match input.date_of_birth.as_deref().filter(|s| !s.is_empty()) {
        None => errors.push(ViolationKind::DateOfBirthRequired.into()),
        Some(raw) => match parse_date(raw) {
            None => errors.push(ViolationKind::InvalidDateFormat.into()),
            Some(date) if date > today => errors.push(ViolationKind::DateOfBirthInFuture.into()),
            Some(_) => {}
        },
    }

    // An empty place of birth counts as not provided
    if let Some(place) = input.place_of_birth.as_deref().filter(|s| !s.is_empty()) {
        if !is_valid_place_characters(place) {
            errors.push(ViolationKind::PlaceOfBirthCharacters.into());
        } else if !is_valid_place_length(place) {
            errors.push(ViolationKind::PlaceOfBirthTooLong.into());
        }
    }

    if !errors.is_empty() {
        tracing::debug!("Person input rejected with {} violation(s)", errors.len());
    }

    errors
}
