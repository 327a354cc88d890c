//! Entity models mapped onto the gallery schema.
//!
//! Each entity has a `Queryable`/`Selectable` read model and an owned
//! `Insertable` counterpart (`New*`) used when buffering pending inserts.

pub mod curated;
pub mod packages;
pub mod users;

pub use curated::*;
pub use packages::*;
pub use users::*;
