//! Parent-child relationship validation
//!
//! A proposed edge runs through an ordered pipeline of checks. Gate checks
//! stop the pipeline on failure; accumulating checks record a violation and
//! let later checks run. The order and the gate/accumulate split decide which
//! violations a caller sees when an edge breaks several rules at once.

use crate::age::age_difference_in_years;
use crate::family::Family;
use crate::limits::{MAX_PARENTS, MIN_PARENT_AGE_DIFFERENCE};
use crate::person::Person;
use crate::violation::{Violation, ViolationKind};

/// How a failing check affects the rest of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Report this violation alone and stop
    Gate,
    /// Report and keep checking
    Accumulate,
}

/// A parent-child edge under consideration
#[derive(Debug, Clone, Copy)]
pub struct ProposedEdge<'e, 'a> {
    pub parent: &'e Person,
    pub child: &'e Person,
    pub family: &'e Family<'a>,
}

/// A single named step of the relationship pipeline
#[derive(Clone, Copy)]
pub struct RelationshipCheck {
    pub name: &'static str,
    pub mode: CheckMode,
    run: fn(&ProposedEdge<'_, '_>) -> Option<ViolationKind>,
}

impl RelationshipCheck {
    pub fn run(&self, edge: &ProposedEdge<'_, '_>) -> Option<ViolationKind> {
        (self.run)(edge)
    }
}

impl std::fmt::Debug for RelationshipCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationshipCheck")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .finish()
    }
}

/// The relationship checks, in evaluation order
pub const RELATIONSHIP_CHECKS: [RelationshipCheck; 5] = [
    RelationshipCheck {
        name: "self_parent",
        mode: CheckMode::Gate,
        run: check_self_parent,
    },
    RelationshipCheck {
        name: "max_parents",
        mode: CheckMode::Gate,
        run: check_max_parents,
    },
    RelationshipCheck {
        name: "already_parent",
        mode: CheckMode::Gate,
        run: check_already_parent,
    },
    RelationshipCheck {
        name: "age_gap",
        mode: CheckMode::Accumulate,
        run: check_age_gap,
    },
    // The age gap already rules out most cycles, since an ancestor is always
    // older. Kept so that loosening the age rule cannot reopen cycles.
    RelationshipCheck {
        name: "cycle",
        mode: CheckMode::Accumulate,
        run: check_cycle,
    },
];

fn check_self_parent(edge: &ProposedEdge<'_, '_>) -> Option<ViolationKind> {
    (edge.parent.id == edge.child.id).then_some(ViolationKind::SelfParent)
}

fn check_max_parents(edge: &ProposedEdge<'_, '_>) -> Option<ViolationKind> {
    (edge.child.parent_ids.len() >= MAX_PARENTS).then_some(ViolationKind::TooManyParents)
}

fn check_already_parent(edge: &ProposedEdge<'_, '_>) -> Option<ViolationKind> {
    edge.child
        .has_parent(&edge.parent.id)
        .then_some(ViolationKind::AlreadyParent)
}

fn check_age_gap(edge: &ProposedEdge<'_, '_>) -> Option<ViolationKind> {
    let difference = age_difference_in_years(edge.parent.date_of_birth, edge.child.date_of_birth);
    (difference < MIN_PARENT_AGE_DIFFERENCE).then_some(ViolationKind::AgeGap { difference })
}

fn check_cycle(edge: &ProposedEdge<'_, '_>) -> Option<ViolationKind> {
    edge.family
        .is_descendant(&edge.parent.id, &edge.child.id)
        .then_some(ViolationKind::Cycle)
}

impl<'a> Family<'a> {
    /// Validate adding `parent` as a parent of `child` against this family
    pub fn validate_parent(&self, parent: &Person, child: &Person) -> Vec<Violation> {
        let edge = ProposedEdge {
            parent,
            child,
            family: self,
        };
        let mut errors = Vec::new();

        for check in &RELATIONSHIP_CHECKS {
            let Some(kind) = check.run(&edge) else {
                continue;
            };

            tracing::debug!(
                "Relationship {} -> {} failed check {}",
                parent.id,
                child.id,
                check.name
            );
            errors.push(Violation::from(kind));

            if check.mode == CheckMode::Gate {
                break;
            }
        }

        errors
    }
}

/// Validate adding a parent relationship.
///
/// Returns an empty list when the edge is legal; the caller may then append
/// `parent.id` to `child.parent_ids`.
pub fn validate_parent_relationship(
    parent: &Person,
    child: &Person,
    all_persons: &[Person],
) -> Vec<Violation> {
    Family::new(all_persons).validate_parent(parent, child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::Field;
    use chrono::NaiveDate;

    fn person(id: &str, dob: &str, parents: &[&str]) -> Person {
        let date = NaiveDate::parse_from_str(dob, "%Y-%m-%d").unwrap();
        parents
            .iter()
            .fold(Person::new("Test Person", date).with_id(id), |p, parent| {
                p.with_parent(*parent)
            })
    }

    fn messages(errors: &[Violation]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_valid_relationship() {
        let alice = person("alice", "1960-01-01", &[]);
        let bob = person("bob", "1985-01-01", &[]);
        let all = vec![alice.clone(), bob.clone()];

        assert!(validate_parent_relationship(&alice, &bob, &all).is_empty());
    }

    #[test]
    fn test_self_parent() {
        let p = person("same", "1990-01-01", &[]);
        let errors = validate_parent_relationship(&p, &p, &[p.clone()]);

        assert_eq!(messages(&errors), vec!["A person cannot be their own parent"]);
        assert_eq!(errors[0].field, Field::ParentId);
    }

    #[test]
    fn test_self_parent_stops_before_age_and_max_parents() {
        // Also has two parents and no age gap, but only the first rule reports
        let p = person("same", "1990-01-01", &["a", "b"]);
        let errors = validate_parent_relationship(&p, &p, &[p.clone()]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::SelfParent);
    }

    #[test]
    fn test_max_parents() {
        let p1 = person("parent1", "1970-01-01", &[]);
        let p2 = person("parent2", "1970-01-01", &[]);
        // Too young and already at the limit: only the max-parents error fires
        let newcomer = person("parent3", "1989-01-01", &[]);
        let child = person("child", "1990-01-01", &["parent1", "parent2"]);
        let all = vec![p1, p2, newcomer.clone(), child.clone()];

        let errors = validate_parent_relationship(&newcomer, &child, &all);
        assert_eq!(messages(&errors), vec!["A person can have at most 2 parents"]);
    }

    #[test]
    fn test_max_parents_not_triggered_below_limit() {
        let p1 = person("parent1", "1970-01-01", &[]);
        let p2 = person("parent2", "1971-01-01", &[]);
        let child = person("child", "1990-01-01", &["parent1"]);
        let all = vec![p1, p2.clone(), child.clone()];

        assert!(validate_parent_relationship(&p2, &child, &all).is_empty());
    }

    #[test]
    fn test_already_parent() {
        let parent = person("parent", "1970-01-01", &[]);
        let child = person("child", "1990-01-01", &["parent"]);
        let all = vec![parent.clone(), child.clone()];

        let errors = validate_parent_relationship(&parent, &child, &all);
        assert_eq!(messages(&errors), vec!["This person is already a parent"]);
    }

    #[test]
    fn test_age_gap_too_small() {
        let parent = person("parent", "1985-01-01", &[]);
        let child = person("child", "1990-01-01", &[]);
        let all = vec![parent.clone(), child.clone()];

        let errors = validate_parent_relationship(&parent, &child, &all);
        assert_eq!(
            messages(&errors),
            vec!["Parent must be at least 15 years older than child (current difference: 5 years)"]
        );
    }

    #[test]
    fn test_age_gap_boundary() {
        let child = person("child", "1990-01-01", &[]);

        let exact = person("exact", "1975-01-01", &[]);
        let all = vec![exact.clone(), child.clone()];
        assert!(validate_parent_relationship(&exact, &child, &all).is_empty());

        let day_short = person("short", "1975-01-02", &[]);
        let all = vec![day_short.clone(), child.clone()];
        let errors = validate_parent_relationship(&day_short, &child, &all);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("(current difference: 14 years)"));
    }

    #[test]
    fn test_cycle_detected() {
        let g = person("G", "1930-01-01", &[]);
        let p = person("P", "1960-01-01", &["G"]);
        let c = person("C", "1990-01-01", &["P"]);
        let all = vec![g.clone(), p, c.clone()];

        // Adding C as a parent of G: C is a descendant of G
        let errors = validate_parent_relationship(&c, &g, &all);
        assert!(errors.iter().any(|e| e.kind == ViolationKind::Cycle));
        assert!(messages(&errors).contains(
            &"Cannot create cyclical relationship: this person is a descendant of the child"
        ));
    }

    #[test]
    fn test_age_and_cycle_both_reported() {
        let g = person("G", "1930-01-01", &[]);
        let p = person("P", "1960-01-01", &["G"]);
        let c = person("C", "1990-01-01", &["P"]);
        let all = vec![g.clone(), p, c.clone()];

        let errors = validate_parent_relationship(&c, &g, &all);
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::AgeGap { difference: -60 }, ViolationKind::Cycle]
        );
    }

    #[test]
    fn test_cycle_without_age_violation() {
        // Corrupt birth dates let a "descendant" be older than the ancestor
        let root = person("root", "1990-01-01", &[]);
        let desc = person("desc", "1950-01-01", &["root"]);
        let all = vec![root.clone(), desc.clone()];

        let errors = validate_parent_relationship(&desc, &root, &all);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::Cycle);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let parent = person("parent", "1985-01-01", &[]);
        let child = person("child", "1990-01-01", &[]);
        let all = vec![parent.clone(), child.clone()];

        let first = validate_parent_relationship(&parent, &child, &all);
        let second = validate_parent_relationship(&parent, &child, &all);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pipeline_order() {
        let names: Vec<_> = RELATIONSHIP_CHECKS.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["self_parent", "max_parents", "already_parent", "age_gap", "cycle"]
        );
        assert!(RELATIONSHIP_CHECKS[..3].iter().all(|c| c.mode == CheckMode::Gate));
        assert!(RELATIONSHIP_CHECKS[3..].iter().all(|c| c.mode == CheckMode::Accumulate));
    }
}
