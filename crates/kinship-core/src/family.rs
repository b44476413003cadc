//! Indexed view over a person collection

use std::collections::HashMap;

use crate::person::{Person, PersonId};

/// Borrowed, indexed view of a person collection (the family graph).
///
/// Edges are stored on the child (`parent_ids`). The view adds a reverse
/// index from parent id to children so both directions can be walked in
/// O(V+E). Dangling parent ids stay in the reverse index but never resolve
/// to a person.
#[derive(Debug, Clone)]
pub struct Family<'a> {
    persons: &'a [Person],
    by_id: HashMap<&'a PersonId, &'a Person>,
    children: HashMap<&'a PersonId, Vec<&'a Person>>,
}

impl<'a> Family<'a> {
    pub fn new(persons: &'a [Person]) -> Self {
        let mut by_id: HashMap<&'a PersonId, &'a Person> = HashMap::with_capacity(persons.len());
        let mut children: HashMap<&'a PersonId, Vec<&'a Person>> = HashMap::new();

        for person in persons {
            // First occurrence wins if the collection repeats an id
            by_id.entry(&person.id).or_insert(person);

            for (i, parent_id) in person.parent_ids.iter().enumerate() {
                if person.parent_ids[..i].contains(parent_id) {
                    continue;
                }
                children.entry(parent_id).or_default().push(person);
            }
        }

        Self {
            persons,
            by_id,
            children,
        }
    }

    /// All persons, in collection order
    pub fn persons(&self) -> &'a [Person] {
        self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn get(&self, id: &PersonId) -> Option<&'a Person> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Resolved parents of a person; dangling ids are skipped
    pub fn parents_of(&self, id: &PersonId) -> Vec<&'a Person> {
        self.get(id)
            .map(|person| {
                person
                    .parent_ids
                    .iter()
                    .filter_map(|pid| self.get(pid))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Persons listing `id` among their parents, in collection order
    pub fn children_of(&self, id: &PersonId) -> &[&'a Person] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parent ids that do not resolve to any person in the collection
    pub fn dangling_parent_ids(&self) -> Vec<(&'a PersonId, &'a PersonId)> {
        self.persons
            .iter()
            .flat_map(|p| p.parent_ids.iter().map(move |pid| (&p.id, pid)))
            .filter(|(_, pid)| !self.contains(pid))
            .collect()
    }
}
