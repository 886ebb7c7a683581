//! HTTP API.
//!
//! Stateless extraction and report rendering, plus incremental sessions
//! that merge documents as their extractions complete. All routes are
//! nested under `/api/`.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer};
pub use types::ApiContext;
