//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `http` - axum REST API
//! - `stripe` - Payment provider and webhook verification
//! - `postgres` - sqlx-backed repositories and the purchase ledger
//! - `memory` - In-process repositories for tests and local runs
//! - `auth` - Token issuing/validation and password hashing

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
