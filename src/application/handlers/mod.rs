//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, one
//! handler per operation, grouped by module.

pub mod account;
pub mod catalog;
pub mod enrollment;
pub mod payment;

pub(crate) mod user_writes;
