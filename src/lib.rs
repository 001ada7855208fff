//! Authentication and authorization gateway.
//!
//! Verifies Basic/Bearer credentials, issues and refreshes HS256 token pairs,
//! and gates routes so that authentication failures become 401 and
//! authorization denials raised by handlers become 403.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
