//! In-memory storage adapters for testing and local development.
//!
//! # Panics
//!
//! Methods use `.expect()` on lock operations and panic if a lock is
//! poisoned. These adapters should NOT be used in production; use the
//! PostgreSQL adapters instead.

mod course_repository;
mod purchase_ledger;
mod user_repository;

pub use course_repository::InMemoryCourseRepository;
pub use purchase_ledger::InMemoryPurchaseLedger;
pub use user_repository::InMemoryUserRepository;
