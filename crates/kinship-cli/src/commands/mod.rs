//! CLI command implementations

pub mod completions;
pub mod config;
pub mod lineage;
pub mod parent;
pub mod person;
