//! Kinship Storage - Persistence for the family tree
//!
//! This crate provides the repository abstraction, its storage backends, and
//! the family service that runs validated read-modify-write operations on top
//! of a repository.

#![allow(clippy::result_large_err)]

pub mod error;
pub mod json;
pub mod memory;
pub mod service;
pub mod traits;

#[cfg(feature = "redb")]
pub mod redb;

pub use error::{StorageError, StorageResult};
pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
pub use service::FamilyService;
pub use traits::FamilyRepository;

#[cfg(feature = "redb")]
pub use redb::RedbStorage;
