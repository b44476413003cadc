//! Family service: validated operations over a repository
//!
//! Every mutation runs load, validate and save while holding a single writer
//! lock, so the validator always sees a consistent snapshot and two
//! mutations never interleave within one process.

use std::sync::Arc;

use kinship_core::{
    parse_date, validate_fields, Error, Family, LineageView, Person, PersonId, PersonInput,
    Result,
};
use tokio::sync::Mutex;

use crate::traits::FamilyRepository;

/// Family operations shared by the CLI and the HTTP server
pub struct FamilyService<R: FamilyRepository + ?Sized> {
    repo: Arc<R>,
    write_lock: Mutex<()>,
}

impl<R: FamilyRepository + ?Sized> FamilyService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn health_check(&self) -> Result<bool> {
        Ok(self.repo.health_check().await?)
    }

    pub async fn list_persons(&self) -> Result<Vec<Person>> {
        Ok(self.repo.get_persons().await?)
    }

    pub async fn get_person(&self, id: &PersonId) -> Result<Person> {
        self.repo
            .get_person(id)
            .await?
            .ok_or_else(|| Error::PersonNotFound(id.clone()))
    }

    /// Validate input and store a new person with a fresh id and no parents
    pub async fn create_person(&self, input: &PersonInput) -> Result<Person> {
        let errors = validate_fields(input);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        let name = input.name.as_deref().unwrap_or_default().trim();
        let date_of_birth = input
            .date_of_birth
            .as_deref()
            .and_then(parse_date)
            .ok_or_else(|| Error::Internal("date of birth missing after validation".into()))?;

        let mut person = Person::new(name, date_of_birth);
        person.place_of_birth = input
            .place_of_birth
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from);

        let _guard = self.write_lock.lock().await;
        self.repo.add_person(&person).await?;
        tracing::info!("Created person: {} ({})", person.name, person.id);

        Ok(person)
    }

    /// Delete a person; survivors lose any parent link to them
    pub async fn delete_person(&self, id: &PersonId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if !self.repo.delete_person(id).await? {
            return Err(Error::PersonNotFound(id.clone()));
        }
        tracing::info!("Deleted person: {}", id);
        Ok(())
    }

    /// Add `parent_id` as a parent of `child_id`, returning the updated child
    pub async fn add_parent(&self, child_id: &PersonId, parent_id: &PersonId) -> Result<Person> {
        if parent_id.as_str().is_empty() {
            return Err(Error::MissingParentId);
        }

        let _guard = self.write_lock.lock().await;
        let data = self.repo.load().await?;

        let child = data
            .find(child_id)
            .ok_or_else(|| Error::PersonNotFound(child_id.clone()))?;
        let parent = data
            .find(parent_id)
            .ok_or_else(|| Error::ParentNotFound(parent_id.clone()))?;

        let errors = Family::new(&data.persons).validate_parent(parent, child);
        if !errors.is_empty() {
            tracing::info!(
                "Rejected parent {} for {}: {} violation(s)",
                parent_id,
                child_id,
                errors.len()
            );
            return Err(Error::Validation(errors));
        }

        let updated = child.clone().with_parent(parent_id.clone());
        let saved = self
            .repo
            .update_person(&updated)
            .await?
            .ok_or_else(|| Error::PersonNotFound(child_id.clone()))?;
        tracing::info!("Added parent {} to {}", parent_id, child_id);

        Ok(saved)
    }

    /// Remove `parent_id` from the parents of `child_id`, returning the updated child
    pub async fn remove_parent(&self, child_id: &PersonId, parent_id: &PersonId) -> Result<Person> {
        let _guard = self.write_lock.lock().await;

        let mut child = self
            .repo
            .get_person(child_id)
            .await?
            .ok_or_else(|| Error::PersonNotFound(child_id.clone()))?;

        if !child.remove_parent(parent_id) {
            return Err(Error::RelationshipNotFound {
                parent: parent_id.clone(),
                child: child_id.clone(),
            });
        }

        let saved = self
            .repo
            .update_person(&child)
            .await?
            .ok_or_else(|| Error::PersonNotFound(child_id.clone()))?;
        tracing::info!("Removed parent {} from {}", parent_id, child_id);

        Ok(saved)
    }

    /// Persons that could legally become a parent of `child_id`
    pub async fn available_parents(&self, child_id: &PersonId) -> Result<Vec<Person>> {
        let data = self.repo.load().await?;
        let family = Family::new(&data.persons);
        if !family.contains(child_id) {
            return Err(Error::PersonNotFound(child_id.clone()));
        }
        Ok(family
            .available_parents(child_id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn ancestors(&self, id: &PersonId) -> Result<Vec<Person>> {
        let data = self.repo.load().await?;
        let family = Family::new(&data.persons);
        if !family.contains(id) {
            return Err(Error::PersonNotFound(id.clone()));
        }
        Ok(family.ancestors(id).into_iter().cloned().collect())
    }

    pub async fn descendants(&self, id: &PersonId) -> Result<Vec<Person>> {
        let data = self.repo.load().await?;
        let family = Family::new(&data.persons);
        if !family.contains(id) {
            return Err(Error::PersonNotFound(id.clone()));
        }
        Ok(family.descendants(id).into_iter().cloned().collect())
    }

    pub async fn lineage(&self, id: &PersonId) -> Result<LineageView> {
        let data = self.repo.load().await?;
        Family::new(&data.persons)
            .lineage(id)
            .ok_or_else(|| Error::PersonNotFound(id.clone()))
    }
}
