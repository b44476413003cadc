//! Kinship Core - Family tree engine
//!
//! This crate provides the person model, field and relationship validation,
//! and lineage traversal for the Kinship family tree. It performs no I/O:
//! every operation takes the person collection as an argument.

pub mod age;
pub mod error;
pub mod family;
pub mod fields;
pub mod limits;
pub mod person;
pub mod query;
pub mod traversal;
pub mod validation;
pub mod violation;

pub use age::{age_difference_in_years, parse_date};
pub use error::{Error, Result};
pub use family::Family;
pub use fields::{validate_fields, validate_fields_on};
pub use person::{FamilyData, Person, PersonId, PersonInput};
pub use query::{get_available_parents, lineage_view, LineageView};
pub use traversal::{
    ancestor_generations, descendant_generations, get_ancestors, get_descendants, is_descendant,
    Direction, Generation, TraversalStats,
};
pub use validation::{
    validate_parent_relationship, CheckMode, ProposedEdge, RelationshipCheck, RELATIONSHIP_CHECKS,
};
pub use violation::{Field, Violation, ViolationKind};
