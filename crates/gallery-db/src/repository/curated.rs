//! Curated feed queries.

use diesel::prelude::*;

use crate::{
    models::{CuratedFeed, CuratedPackage, PackageRegistration, User},
    schema::{curated_feed_managers, curated_feeds, curated_packages, package_registrations, users},
};

/// Repository for curated feed operations.
pub struct CuratedRepository;

impl CuratedRepository {
    /// Lists all curated feeds.
    pub fn list_feeds(conn: &mut SqliteConnection) -> QueryResult<Vec<CuratedFeed>> {
        curated_feeds::table
            .select(CuratedFeed::as_select())
            .load(conn)
    }

    /// Finds a curated feed by name.
    pub fn find_feed_by_name(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> QueryResult<Option<CuratedFeed>> {
        curated_feeds::table
            .filter(curated_feeds::name.eq(name))
            .select(CuratedFeed::as_select())
            .first(conn)
            .optional()
    }

    /// Curated entries of a feed, joined to their package registrations.
    pub fn packages_in_feed(
        conn: &mut SqliteConnection,
        feed_key: i32,
    ) -> QueryResult<Vec<(CuratedPackage, PackageRegistration)>> {
        curated_packages::table
            .inner_join(package_registrations::table)
            .filter(curated_packages::curated_feed_id.eq(feed_key))
            .select((
                CuratedPackage::as_select(),
                PackageRegistration::as_select(),
            ))
            .load(conn)
    }

    /// Users managing a feed, through the join table.
    pub fn managers_of(conn: &mut SqliteConnection, feed_key: i32) -> QueryResult<Vec<User>> {
        curated_feed_managers::table
            .inner_join(users::table)
            .filter(curated_feed_managers::curated_feed_id.eq(feed_key))
            .select(User::as_select())
            .load(conn)
    }
}
