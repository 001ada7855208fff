/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth::gate (per-route authentication), http (cross-cutting HTTP concerns)
 */
pub mod auth;
pub mod http;
