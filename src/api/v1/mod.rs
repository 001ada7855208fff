/*
 * Responsibility
 * - Entry point of v1 (re-exports the route builders)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{auth_routes, routes};
