//! HTTP adapters - REST API implementations.
//!
//! Each domain area has its own HTTP adapter; `router` stitches them
//! together under `/api`.

pub mod account;
pub mod catalog;
pub mod enrollment;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod payment;
mod router;

pub use error::ErrorResponse;
pub use extract::ApiJson;
pub use router::{app_router, AppDeps};
