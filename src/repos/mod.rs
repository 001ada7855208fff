/*
 * Responsibility
 * - Identity store seam (trait) and its implementations
 */
pub mod error;
pub mod identity;
pub mod memory_user_repo;
pub mod user_repo;

pub use identity::{Identity, IdentityStore};
pub use memory_user_repo::InMemoryUserRepo;
pub use user_repo::PgUserRepo;
