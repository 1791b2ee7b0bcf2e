//! Repository traits defining data access contracts.
//!
//! Traits are implemented by [`crate::infrastructure::persistence`] and
//! mocked in service unit tests.

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
