//! HTTP adapter for account endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AuthResponse, UserSummaryResponse, UserView};
pub use handlers::{AccountApiError, AccountAppState};
pub use routes::account_routes;
