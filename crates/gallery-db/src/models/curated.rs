use diesel::prelude::*;

use crate::schema::{curated_feed_managers, curated_feeds, curated_packages};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = curated_feeds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CuratedFeed {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = curated_feeds)]
pub struct NewCuratedFeed {
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = curated_packages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CuratedPackage {
    pub id: i32,
    pub curated_feed_id: i32,
    pub package_registration_id: i32,
    pub automatically_curated: bool,
    pub included: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = curated_packages)]
pub struct NewCuratedPackage {
    pub curated_feed_id: i32,
    pub package_registration_id: i32,
    pub automatically_curated: bool,
    pub included: bool,
    pub notes: Option<String>,
}

/// Join row tying a curated feed to a managing user.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = curated_feed_managers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CuratedFeedManager {
    pub curated_feed_id: i32,
    pub user_id: i32,
}
