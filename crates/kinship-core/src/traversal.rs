//! Lineage traversal: ancestors and descendants by breadth-first search

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::family::Family;
use crate::person::{Person, PersonId};

/// Which way to walk parent links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow `parent_ids` upward
    Ancestors,
    /// Follow the reverse index downward
    Descendants,
}

/// One generation of a lineage, at a fixed distance from the start person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    /// 1 = parents (or children), 2 = grandparents (or grandchildren), ...
    pub depth: u32,
    pub persons: Vec<Person>,
}

/// Traversal statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    pub nodes_visited: usize,
    pub edges_traversed: usize,
    pub max_depth_reached: u32,
}

impl<'a> Family<'a> {
    fn neighbors(&self, id: &PersonId, direction: Direction) -> Vec<&'a Person> {
        match direction {
            Direction::Ancestors => self.parents_of(id),
            Direction::Descendants => self.children_of(id).to_vec(),
        }
    }

    /// Breadth-first walk from `id`, returning every distinct person reached
    /// with the depth it was first reached at.
    ///
    /// The start person is not pre-marked as visited, so it only shows up if
    /// malformed data loops back to it. Each person is expanded at most once.
    pub fn walk(
        &self,
        id: &PersonId,
        direction: Direction,
    ) -> (Vec<(u32, &'a Person)>, TraversalStats) {
        let mut stats = TraversalStats::default();
        let mut found = Vec::new();

        if !self.contains(id) {
            return (found, stats);
        }

        let mut visited: HashSet<&'a PersonId> = HashSet::new();
        let mut queue: VecDeque<(&'a Person, u32)> = self
            .neighbors(id, direction)
            .into_iter()
            .map(|p| (p, 1))
            .collect();
        stats.edges_traversed += queue.len();

        while let Some((person, depth)) = queue.pop_front() {
            if !visited.insert(&person.id) {
                continue;
            }
            stats.nodes_visited += 1;
            stats.max_depth_reached = stats.max_depth_reached.max(depth);
            found.push((depth, person));

            for next in self.neighbors(&person.id, direction) {
                stats.edges_traversed += 1;
                queue.push_back((next, depth + 1));
            }
        }

        tracing::debug!(
            "Lineage walk ({:?}) from {} visited {} persons, traversed {} edges",
            direction,
            id,
            stats.nodes_visited,
            stats.edges_traversed
        );

        (found, stats)
    }

    /// Every ancestor of `id`, in breadth-first discovery order
    pub fn ancestors(&self, id: &PersonId) -> Vec<&'a Person> {
        self.walk(id, Direction::Ancestors)
            .0
            .into_iter()
            .map(|(_, p)| p)
            .collect()
    }

    /// Every descendant of `id`, in breadth-first discovery order
    pub fn descendants(&self, id: &PersonId) -> Vec<&'a Person> {
        self.walk(id, Direction::Descendants)
            .0
            .into_iter()
            .map(|(_, p)| p)
            .collect()
    }

    /// Whether `candidate` can be reached from `root` by following child links.
    ///
    /// Stops as soon as `candidate` turns up as a child. Each parent id is
    /// expanded at most once, so malformed cyclic data still terminates.
    pub fn is_descendant(&self, candidate: &PersonId, root: &PersonId) -> bool {
        let mut visited: HashSet<&PersonId> = HashSet::new();
        let mut queue: VecDeque<&PersonId> = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }

            for child in self.children_of(current) {
                if &child.id == candidate {
                    return true;
                }
                queue.push_back(&child.id);
            }
        }

        false
    }

    /// Lineage of `id` grouped by generation, nearest first
    pub fn generations(&self, id: &PersonId, direction: Direction) -> Vec<Generation> {
        let (found, _) = self.walk(id, direction);
        let mut generations: Vec<Generation> = Vec::new();

        // BFS yields depths in non-decreasing order
        for (depth, person) in found {
            match generations.last_mut() {
                Some(generation) if generation.depth == depth => {
                    generation.persons.push(person.clone());
                }
                _ => generations.push(Generation {
                    depth,
                    persons: vec![person.clone()],
                }),
            }
        }

        generations
    }
}

/// Get all ancestors of a person.
///
/// Returns an empty list if `person_id` is not in the collection.
pub fn get_ancestors(person_id: &PersonId, all_persons: &[Person]) -> Vec<Person> {
    Family::new(all_persons)
        .ancestors(person_id)
        .into_iter()
        .cloned()
        .collect()
}

/// Get all descendants of a person.
pub fn get_descendants(person_id: &PersonId, all_persons: &[Person]) -> Vec<Person> {
    Family::new(all_persons)
        .descendants(person_id)
        .into_iter()
        .cloned()
        .collect()
}

/// Check if `candidate_id` is a descendant of `root_id`
pub fn is_descendant(candidate_id: &PersonId, root_id: &PersonId, all_persons: &[Person]) -> bool {
    Family::new(all_persons).is_descendant(candidate_id, root_id)
}

pub fn ancestor_generations(person_id: &PersonId, all_persons: &[Person]) -> Vec<Generation> {
    Family::new(all_persons).generations(person_id, Direction::Ancestors)
}

pub fn descendant_generations(person_id: &PersonId, all_persons: &[Person]) -> Vec<Generation> {
    Family::new(all_persons).generations(person_id, Direction::Descendants)
}
