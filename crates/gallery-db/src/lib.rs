pub mod context;
pub mod error;
pub mod factory;
pub mod helpers;
pub mod migration;
pub mod model;
pub mod models;
pub mod repository;
pub mod schema;

pub use context::{EntitySet, GalleryContext};
pub use error::{DbError, Result};
pub use factory::ContextFactory;
pub use helpers::*;
