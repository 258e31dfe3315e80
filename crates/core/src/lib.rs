//! Clean Heat Core - Domain entities, services, and traits.
//!
//! This crate holds the client-side logic of the rebate desk: record models,
//! checklist progress, list aggregation, form validation, the detail editor
//! and the signed-in session. It knows nothing about HTTP; the `connect`
//! crate implements the repository and gateway traits defined here.

pub mod aggregation;
pub mod applications;
pub mod clients;
pub mod constants;
pub mod errors;
pub mod forms;
pub mod money;
pub mod session;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
