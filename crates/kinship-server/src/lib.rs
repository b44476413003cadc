//! Kinship Server - REST API for the family tree
//!
//! Exposes the family service over HTTP using the `/api/persons` routes and
//! the `{success, data, error, errors}` response envelope.

pub mod response;
pub mod routes;

pub use response::{ApiError, ApiResponse};
pub use routes::{create_router, run_server};
