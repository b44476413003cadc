//! ReDB storage backend

use crate::error::{StorageError, StorageResult};
use crate::traits::FamilyRepository;
use async_trait::async_trait;
use kinship_core::{FamilyData, Person};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Mutex;

// Persons keyed by their position in the collection, so order survives a
// load/save round trip
const PERSONS: TableDefinition<u64, &[u8]> = TableDefinition::new("persons");

/// ReDB storage backend
pub struct RedbStorage {
    db: Mutex<Database>,
}

impl RedbStorage {
    /// Open or create a ReDB database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

        // Initialize tables
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| StorageError::Database(e.to_string()))?;
            {
                let _ = write_txn.open_table(PERSONS)?;
            }
            write_txn
                .commit()
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        Ok(Self { db: Mutex::new(db) })
    }
}

#[async_trait]
impl FamilyRepository for RedbStorage {
    async fn health_check(&self) -> StorageResult<bool> {
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(read_txn.open_table(PERSONS).is_ok())
    }

    async fn load(&self) -> StorageResult<FamilyData> {
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(PERSONS)?;

        let mut persons = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let person: Person = serde_json::from_slice(value.value())?;
            persons.push(person);
        }

        Ok(FamilyData { persons })
    }

    async fn save(&self, data: &FamilyData) -> StorageResult<()> {
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            write_txn.delete_table(PERSONS)?;
            let mut table = write_txn.open_table(PERSONS)?;
            for (position, person) in data.persons.iter().enumerate() {
                let value = serde_json::to_vec(person)?;
                table.insert(position as u64, value.as_slice())?;
            }
        }
        write_txn.commit()?;

        tracing::debug!("Saved {} persons to redb", data.persons.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kinship_core::PersonId;
    use tempfile::TempDir;

    fn person(id: &str) -> Person {
        Person::new(id, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()).with_id(id)
    }

    #[tokio::test]
    async fn test_redb_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = RedbStorage::open(dir.path().join("kinship.redb")).unwrap();
        assert!(storage.health_check().await.unwrap());
        assert!(storage.load().await.unwrap().persons.is_empty());

        for id in ["m", "c", "a", "z", "b", "k", "x", "d", "e", "f", "g", "h"] {
            storage.add_person(&person(id)).await.unwrap();
        }

        let ids: Vec<_> = storage
            .get_persons()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec!["m", "c", "a", "z", "b", "k", "x", "d", "e", "f", "g", "h"]);
    }

    #[tokio::test]
    async fn test_redb_save_replaces_collection() {
        let dir = TempDir::new().unwrap();
        let storage = RedbStorage::open(dir.path().join("kinship.redb")).unwrap();

        storage.add_person(&person("a")).await.unwrap();
        storage.add_person(&person("b").with_parent("a")).await.unwrap();
        assert!(storage.delete_person(&PersonId::from("a")).await.unwrap());

        let persons = storage.get_persons().await.unwrap();
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].id, PersonId::from("b"));
        assert!(persons[0].parent_ids.is_empty());
    }
}
