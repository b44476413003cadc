//! Read-only queries for presentation layers

use serde::Serialize;

use crate::family::Family;
use crate::person::{Person, PersonId};
use crate::traversal::{Direction, Generation};

/// A person together with their lineage, grouped by generation
#[derive(Debug, Clone, Serialize)]
pub struct LineageView {
    pub person: Person,
    pub ancestors: Vec<Generation>,
    pub descendants: Vec<Generation>,
}

impl LineageView {
    /// True when the person has neither ancestors nor descendants on record
    pub fn is_isolated(&self) -> bool {
        self.ancestors.is_empty() && self.descendants.is_empty()
    }
}

impl<'a> Family<'a> {
    /// Every person that could legally be added as a parent of `child_id`
    pub fn available_parents(&self, child_id: &PersonId) -> Vec<&'a Person> {
        let Some(child) = self.get(child_id) else {
            return Vec::new();
        };

        self.persons()
            .iter()
            .filter(|candidate| self.validate_parent(candidate, child).is_empty())
            .collect()
    }

    pub fn lineage(&self, person_id: &PersonId) -> Option<LineageView> {
        let person = self.get(person_id)?;
        Some(LineageView {
            person: person.clone(),
            ancestors: self.generations(person_id, Direction::Ancestors),
            descendants: self.generations(person_id, Direction::Descendants),
        })
    }
}

/// Get all persons that can be added as a parent of `child_id`.
///
/// Recomputed on every call; each candidate costs one relationship
/// validation.
pub fn get_available_parents(child_id: &PersonId, all_persons: &[Person]) -> Vec<Person> {
    Family::new(all_persons)
        .available_parents(child_id)
        .into_iter()
        .cloned()
        .collect()
}

/// Get a person's lineage view, or `None` if the person is unknown
pub fn lineage_view(person_id: &PersonId, all_persons: &[Person]) -> Option<LineageView> {
    Family::new(all_persons).lineage(person_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_parent_relationship;
    use chrono::NaiveDate;

    fn person(id: &str, dob: &str, parents: &[&str]) -> Person {
        let date = NaiveDate::parse_from_str(dob, "%Y-%m-%d").unwrap();
        parents
            .iter()
            .fold(Person::new(id, date).with_id(id), |p, parent| p.with_parent(*parent))
    }

    fn create_test_family() -> Vec<Person> {
        vec![
            person("grandma", "1930-01-01", &[]),
            person("mum", "1960-01-01", &["grandma"]),
            person("aunt", "1962-01-01", &["grandma"]),
            person("kid", "1990-01-01", &["mum"]),
            person("cousin", "1991-06-01", &["aunt"]),
            person("stranger", "1950-01-01", &[]),
        ]
    }

    fn ids(persons: &[Person]) -> Vec<&str> {
        persons.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_available_parents() {
        let all = create_test_family();

        // kid already has mum; grandma, aunt and stranger are old enough
        assert_eq!(
            ids(&get_available_parents(&"kid".into(), &all)),
            vec!["grandma", "aunt", "stranger"]
        );

        // Nobody can become grandma's parent: everyone else is younger or her descendant
        assert!(get_available_parents(&"grandma".into(), &all).is_empty());
    }

    #[test]
    fn test_available_parents_unknown_child() {
        let all = create_test_family();
        assert!(get_available_parents(&"nobody".into(), &all).is_empty());
    }

    #[test]
    fn test_facade_matches_validator() {
        let all = create_test_family();

        for child in &all {
            let available = get_available_parents(&child.id, &all);
            for candidate in &all {
                let legal = validate_parent_relationship(candidate, child, &all).is_empty();
                let listed = available.iter().any(|p| p.id == candidate.id);
                assert_eq!(legal, listed, "{} as parent of {}", candidate.id, child.id);
            }
        }
    }

    #[test]
    fn test_lineage_view() {
        let all = create_test_family();

        let view = lineage_view(&"mum".into(), &all).unwrap();
        assert_eq!(view.person.id.as_str(), "mum");
        assert_eq!(view.ancestors.len(), 1);
        assert_eq!(ids(&view.ancestors[0].persons), vec!["grandma"]);
        assert_eq!(view.descendants.len(), 1);
        assert_eq!(ids(&view.descendants[0].persons), vec!["kid"]);

        let view = lineage_view(&"stranger".into(), &all).unwrap();
        assert!(view.is_isolated());

        assert!(lineage_view(&"nobody".into(), &all).is_none());
    }
}
