//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `account` - Users and credentials
//! - `enrollment` - Per-user course progress embedded in the user document
//! - `purchase` - Ledger of completed course payments
//! - `catalog` - Course catalog

pub mod account;
pub mod catalog;
pub mod enrollment;
pub mod foundation;
pub mod purchase;
