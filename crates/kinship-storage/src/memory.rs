//! In-memory storage backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::FamilyRepository;
use async_trait::async_trait;
use kinship_core::{FamilyData, Person};
use std::sync::RwLock;

/// In-memory storage backend
///
/// Useful for testing and temporary storage.
pub struct MemoryStorage {
    data: RwLock<FamilyData>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(FamilyData::default()),
        }
    }

    /// Create a store pre-populated with `persons`
    pub fn with_persons(persons: Vec<Person>) -> Self {
        Self {
            data: RwLock::new(FamilyData::new().with_persons(persons)),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FamilyRepository for MemoryStorage {
    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn load(&self) -> StorageResult<FamilyData> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        Ok(data.clone())
    }

    async fn save(&self, data: &FamilyData) -> StorageResult<()> {
        let mut stored = self
            .data
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        *stored = data.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kinship_core::PersonId;

    fn person(id: &str, parents: &[&str]) -> Person {
        let dob = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        parents
            .iter()
            .fold(Person::new(id, dob).with_id(id), |p, parent| p.with_parent(*parent))
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.get_persons().await.unwrap().is_empty());

        storage.add_person(&person("a", &[])).await.unwrap();
        storage.add_person(&person("b", &["a"])).await.unwrap();

        let retrieved = storage.get_person(&PersonId::from("b")).await.unwrap();
        assert_eq!(retrieved.unwrap().parent_ids, vec![PersonId::from("a")]);

        let ids: Vec<_> = storage
            .get_persons()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_update_person() {
        let storage = MemoryStorage::with_persons(vec![person("a", &[])]);

        let mut updated = person("a", &[]);
        updated.name = "Renamed".to_string();
        assert!(storage.update_person(&updated).await.unwrap().is_some());
        assert_eq!(
            storage.get_person(&"a".into()).await.unwrap().unwrap().name,
            "Renamed"
        );

        assert!(storage.update_person(&person("zz", &[])).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_strips_references() {
        let storage = MemoryStorage::with_persons(vec![
            person("a", &[]),
            person("b", &["a"]),
            person("c", &["b", "a"]),
        ]);

        assert!(storage.delete_person(&"a".into()).await.unwrap());
        let persons = storage.get_persons().await.unwrap();
        assert_eq!(persons.len(), 2);
        assert!(persons[0].parent_ids.is_empty());
        assert_eq!(persons[1].parent_ids, vec![PersonId::from("b")]);

        assert!(!storage.delete_person(&"a".into()).await.unwrap());
    }
}
