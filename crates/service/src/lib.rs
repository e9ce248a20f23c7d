//! Service layer for the forum: private messaging, banners, ACL grants and the
//! unread private message counter cache.
//! - Separates business logic from data access (repository traits per entity).
//! - Every operation takes an explicit [`identity::Identity`] instead of reading
//!   a global "current user".
//! - Each repository ships an in-memory `mock` and a SeaORM implementation.

pub mod errors;
pub mod identity;
pub mod user;
pub mod security;
pub mod banner;
pub mod cache;
pub mod private_message;
pub mod container;
#[cfg(test)]
pub mod test_support;
