//! Repository trait definition

use crate::error::StorageResult;
use async_trait::async_trait;
use kinship_core::{FamilyData, Person, PersonId};

/// Trait for family storage implementations
///
/// Backends only need to load and save the whole collection; the per-person
/// operations are built on top of those two.
#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Health check
    async fn health_check(&self) -> StorageResult<bool>;

    /// Load the entire person collection
    async fn load(&self) -> StorageResult<FamilyData>;

    /// Save the entire person collection (replaces existing)
    async fn save(&self, data: &FamilyData) -> StorageResult<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Person Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get all persons
    async fn get_persons(&self) -> StorageResult<Vec<Person>> {
        Ok(self.load().await?.persons)
    }

    /// Get a person by id
    async fn get_person(&self, id: &PersonId) -> StorageResult<Option<Person>> {
        Ok(self.load().await?.find(id).cloned())
    }

    /// Append a new person
    async fn add_person(&self, person: &Person) -> StorageResult<()> {
        let mut data = self.load().await?;
        data.persons.push(person.clone());
        self.save(&data).await
    }

    /// Replace the stored person with the same id
    ///
    /// Returns `None` when no such person exists.
    async fn update_person(&self, person: &Person) -> StorageResult<Option<Person>> {
        let mut data = self.load().await?;
        let Some(slot) = data.find_mut(&person.id) else {
            return Ok(None);
        };
        *slot = person.clone();
        self.save(&data).await?;
        Ok(Some(person.clone()))
    }

    /// Delete a person and strip its id from every survivor's parents
    ///
    /// Returns `false` when no such person exists.
    async fn delete_person(&self, id: &PersonId) -> StorageResult<bool> {
        let mut data = self.load().await?;
        if !data.remove(id) {
            return Ok(false);
        }
        self.save(&data).await?;
        Ok(true)
    }
}
