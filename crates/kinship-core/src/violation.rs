//! Structured validation outcomes
//!
//! Every validator returns a `Vec<Violation>`. An empty vector means the input
//! is acceptable; callers branch on emptiness, not on a separate status flag.

use serde::Serialize;

use crate::limits::{MAX_PARENTS, MAX_PLACE_OF_BIRTH_LEN, MIN_PARENT_AGE_DIFFERENCE};

/// Field a violation is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    DateOfBirth,
    PlaceOfBirth,
    /// Used for every relationship-level violation, whichever side of the
    /// edge triggered it.
    ParentId,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DateOfBirth => "dateOfBirth",
            Self::PlaceOfBirth => "placeOfBirth",
            Self::ParentId => "parentId",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule a violation breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    NameRequired,
    DateOfBirthRequired,
    InvalidDateFormat,
    DateOfBirthInFuture,
    PlaceOfBirthCharacters,
    PlaceOfBirthTooLong,
    SelfParent,
    TooManyParents,
    AlreadyParent,
    AgeGap { difference: i32 },
    Cycle,
}

impl ViolationKind {
    pub fn field(&self) -> Field {
        match self {
            Self::NameRequired => Field::Name,
            Self::DateOfBirthRequired | Self::InvalidDateFormat | Self::DateOfBirthInFuture => {
                Field::DateOfBirth
            }
            Self::PlaceOfBirthCharacters | Self::PlaceOfBirthTooLong => Field::PlaceOfBirth,
            Self::SelfParent
            | Self::TooManyParents
            | Self::AlreadyParent
            | Self::AgeGap { .. }
            | Self::Cycle => Field::ParentId,
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required"),
            Self::DateOfBirthRequired => write!(f, "Date of birth is required"),
            Self::InvalidDateFormat => write!(f, "Invalid date format"),
            Self::DateOfBirthInFuture => write!(f, "Date of birth cannot be in the future"),
            Self::PlaceOfBirthCharacters => write!(
                f,
                "Place of birth must only contain letters, numbers and spaces"
            ),
            Self::PlaceOfBirthTooLong => write!(
                f,
                "Place of birth must be less than {} characters",
                MAX_PLACE_OF_BIRTH_LEN
            ),
            Self::SelfParent => write!(f, "A person cannot be their own parent"),
            Self::TooManyParents => write!(f, "A person can have at most {} parents", MAX_PARENTS),
            Self::AlreadyParent => write!(f, "This person is already a parent"),
            Self::AgeGap { difference } => write!(
                f,
                "Parent must be at least {} years older than child (current difference: {} years)",
                MIN_PARENT_AGE_DIFFERENCE, difference
            ),
            Self::Cycle => write!(
                f,
                "Cannot create cyclical relationship: this person is a descendant of the child"
            ),
        }
    }
}

/// A single `{field, message}` entry in a violation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: Field,
    pub message: String,
    #[serde(skip)]
    pub kind: ViolationKind,
}

impl From<ViolationKind> for Violation {
    fn from(kind: ViolationKind) -> Self {
        Self {
            field: kind.field(),
            message: kind.to_string(),
            kind,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
