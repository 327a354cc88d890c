//! Typed read-only queries over the gallery schema.
//!
//! Each repository handles one domain:
//!
//! - [`UsersRepository`] - user accounts, roles, email messages
//! - [`PackagesRepository`] - package registrations and their children
//! - [`CuratedRepository`] - curated feeds and their memberships
//!
//! Repositories never write; the single write path is
//! [`crate::GalleryContext::save_changes`], so the read-only check stays at
//! save time.

pub mod curated;
pub mod packages;
pub mod users;

pub use curated::CuratedRepository;
pub use packages::PackagesRepository;
pub use users::UsersRepository;
