//! Academy - course purchase, enrollment and progress backend.
//!
//! Payments are created through a provider and confirmed asynchronously by
//! signed webhooks; each confirmed purchase lands in the ledger exactly once.
//! Enrollment and progress live on the user document and are tracked
//! separately from purchases.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
