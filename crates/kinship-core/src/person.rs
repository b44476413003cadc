//! Person (node) types

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use ulid::Ulid;

use crate::age::parse_date;

/// Unique identifier for a person
///
/// Ids are opaque strings. Freshly created persons get a ULID, but ids coming
/// from an existing data file are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for PersonId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A person in the family tree (a node)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Calendar date of birth, written as `YYYY-MM-DD`. Stored timestamps
    /// are read back as their date part.
    #[serde(deserialize_with = "deserialize_birth_date")]
    pub date_of_birth: NaiveDate,

    /// Optional place of birth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,

    /// Zero, one or two parent ids. Order is insertion order only.
    #[serde(default)]
    pub parent_ids: Vec<PersonId>,
}

fn deserialize_birth_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date of birth: {}", raw)))
}

impl Person {
    /// Create a new person with a generated id and no parents
    pub fn new(name: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            date_of_birth,
            place_of_birth: None,
            parent_ids: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<PersonId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_place_of_birth(mut self, place: impl Into<String>) -> Self {
        self.place_of_birth = Some(place.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<PersonId>) -> Self {
        self.parent_ids.push(parent_id.into());
        self
    }

    /// Check if `id` is one of this person's parents
    pub fn has_parent(&self, id: &PersonId) -> bool {
        self.parent_ids.contains(id)
    }

    /// Remove a parent link, returning whether it was present
    pub fn remove_parent(&mut self, id: &PersonId) -> bool {
        let before = self.parent_ids.len();
        self.parent_ids.retain(|p| p != id);
        self.parent_ids.len() != before
    }
}

/// Raw person fields as submitted by a caller, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
}

impl PersonInput {
    pub fn new(name: impl Into<String>, date_of_birth: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            date_of_birth: Some(date_of_birth.into()),
            place_of_birth: None,
        }
    }

    pub fn with_place_of_birth(mut self, place: impl Into<String>) -> Self {
        self.place_of_birth = Some(place.into());
        self
    }
}

/// On-disk document holding the whole person collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyData {
    #[serde(default)]
    pub persons: Vec<Person>,
}

impl FamilyData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persons(mut self, persons: Vec<Person>) -> Self {
        self.persons = persons;
        self
    }

    pub fn find(&self, id: &PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| &p.id == id)
    }

    pub fn find_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.persons.iter_mut().find(|p| &p.id == id)
    }

    /// Remove a person and strip its id from every survivor's parents
    pub fn remove(&mut self, id: &PersonId) -> bool {
        let before = self.persons.len();
        self.persons.retain(|p| &p.id != id);
        if self.persons.len() == before {
            return false;
        }
        for person in &mut self.persons {
            person.remove_parent(id);
        }
        true
    }
}
