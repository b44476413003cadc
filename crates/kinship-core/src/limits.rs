//! Domain limits for persons and relationships

/// Minimum whole-year age gap between a parent and their child (15 years)
pub const MIN_PARENT_AGE_DIFFERENCE: i32 = 15;

/// Maximum parents per person (2)
pub const MAX_PARENTS: usize = 2;

/// Maximum length for a place of birth (100 chars)
pub const MAX_PLACE_OF_BIRTH_LEN: usize = 100;

/// Check a place of birth against the allowed alphabet: letters, digits and
/// whitespace
pub fn is_valid_place_characters(place: &str) -> bool {
    !place.is_empty()
        && place
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
}

/// Check a place of birth against the length limit (in characters)
pub fn is_valid_place_length(place: &str) -> bool {
    place.chars().count() <= MAX_PLACE_OF_BIRTH_LEN
}
