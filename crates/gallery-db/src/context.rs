//! The gallery persistence context.
//!
//! One context instance bounds one logical unit of work: typed entity sets
//! buffer pending inserts and removals, and [`GalleryContext::save_changes`]
//! flushes them in a single transaction. A context constructed read-only
//! refuses every flush, uniformly across entity types; reads stay available.

use std::time::Duration;

use diesel::{deserialize::QueryableByName, prelude::*, sql_query, sqlite::Sqlite};
use tracing::debug;

use crate::{
    error::{DbError, Result},
    models::{NewCuratedFeed, NewCuratedPackage, NewPackageRegistration, NewUser},
    schema,
};

/// Buffers pending insert and remove operations for one entity table.
///
/// Mutations are accepted unconditionally; the read-only check happens at
/// save time, on the context.
#[derive(Debug, Default)]
pub struct EntitySet<N> {
    added: Vec<N>,
    removed: Vec<i32>,
}

impl<N> EntitySet<N> {
    /// Queues a row for insertion at the next save.
    pub fn add(&mut self, row: N) {
        self.added.push(row);
    }

    /// Queues a delete by surrogate key at the next save.
    pub fn remove(&mut self, key: i32) {
        self.removed.push(key);
    }

    pub fn pending_adds(&self) -> &[N] {
        &self.added
    }

    pub fn pending_removes(&self) -> &[i32] {
        &self.removed
    }

    pub fn has_pending(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }
}

macro_rules! set_flush {
    ($insert_fn:ident, $delete_fn:ident, $table:path, $key:path, $new:ty) => {
        fn $insert_fn(conn: &mut SqliteConnection, rows: &[$new]) -> QueryResult<usize> {
            if rows.is_empty() {
                return Ok(0);
            }
            diesel::insert_into($table).values(rows).execute(conn)
        }

        fn $delete_fn(conn: &mut SqliteConnection, keys: &[i32]) -> QueryResult<usize> {
            if keys.is_empty() {
                return Ok(0);
            }
            diesel::delete($table.filter($key.eq_any(keys.iter().copied()))).execute(conn)
        }
    };
}

set_flush!(
    insert_users,
    delete_users,
    schema::users::table,
    schema::users::id,
    NewUser
);
set_flush!(
    insert_package_registrations,
    delete_package_registrations,
    schema::package_registrations::table,
    schema::package_registrations::id,
    NewPackageRegistration
);
set_flush!(
    insert_curated_feeds,
    delete_curated_feeds,
    schema::curated_feeds::table,
    schema::curated_feeds::id,
    NewCuratedFeed
);
set_flush!(
    insert_curated_packages,
    delete_curated_packages,
    schema::curated_packages::table,
    schema::curated_packages::id,
    NewCuratedPackage
);

/// The persistence context for the package gallery.
///
/// Not shareable across threads; each logical unit of work (e.g. one
/// incoming request) obtains its own instance.
pub struct GalleryContext {
    database_url: String,
    read_only: bool,
    conn: Option<SqliteConnection>,
    pub users: EntitySet<NewUser>,
    pub package_registrations: EntitySet<NewPackageRegistration>,
    pub curated_feeds: EntitySet<NewCuratedFeed>,
    pub curated_packages: EntitySet<NewCuratedPackage>,
}

impl GalleryContext {
    /// Creates a context for the given connection target and mode.
    ///
    /// No I/O happens here; the connection is established lazily on first
    /// access.
    pub fn new(database_url: impl Into<String>, read_only: bool) -> Self {
        Self {
            database_url: database_url.into(),
            read_only,
            conn: None,
            users: EntitySet::default(),
            package_registrations: EntitySet::default(),
            curated_feeds: EntitySet::default(),
            curated_packages: EntitySet::default(),
        }
    }

    /// The connection target this context was constructed with.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Whether this context refuses writes. Fixed at construction.
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Gets the lazily established connection for running queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn connection(&mut self) -> Result<&mut SqliteConnection> {
        if self.conn.is_none() {
            self.conn = Some(establish_connection(&self.database_url)?);
        }
        match self.conn {
            Some(ref mut conn) => Ok(conn),
            None => unreachable!("connection established above"),
        }
    }

    /// Whether any entity set holds operations awaiting a save.
    pub fn has_pending_changes(&self) -> bool {
        self.users.has_pending()
            || self.package_registrations.has_pending()
            || self.curated_feeds.has_pending()
            || self.curated_packages.has_pending()
    }

    /// Flushes every pending operation across all entity sets in one
    /// transaction and returns the count of affected rows.
    ///
    /// # Errors
    ///
    /// Fails with [`DbError::ReadOnlyMode`] before any I/O when the context
    /// is read-only. Engine errors propagate unchanged and leave the pending
    /// operations in place.
    pub fn save_changes(&mut self) -> Result<usize> {
        if self.read_only {
            return Err(DbError::ReadOnlyMode);
        }
        if !self.has_pending_changes() {
            return Ok(0);
        }
        if self.conn.is_none() {
            self.conn = Some(establish_connection(&self.database_url)?);
        }
        let conn = match self.conn {
            Some(ref mut conn) => conn,
            None => unreachable!("connection established above"),
        };

        let affected = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut affected = 0;

            // inserts flush parents before children
            affected += insert_users(conn, self.users.pending_adds())?;
            affected +=
                insert_package_registrations(conn, self.package_registrations.pending_adds())?;
            affected += insert_curated_feeds(conn, self.curated_feeds.pending_adds())?;
            affected += insert_curated_packages(conn, self.curated_packages.pending_adds())?;

            // removes flush children before parents
            affected += delete_curated_packages(conn, self.curated_packages.pending_removes())?;
            affected += delete_curated_feeds(conn, self.curated_feeds.pending_removes())?;
            affected +=
                delete_package_registrations(conn, self.package_registrations.pending_removes())?;
            affected += delete_users(conn, self.users.pending_removes())?;

            Ok(affected)
        })?;

        self.users.clear();
        self.package_registrations.clear();
        self.curated_feeds.clear();
        self.curated_packages.clear();

        debug!("Flushed {affected} pending changes");
        Ok(affected)
    }

    /// Executes a raw, parameterless, read-oriented SQL statement against a
    /// freshly established connection and projects the loaded rows through
    /// `loader`.
    ///
    /// The query text must not contain user-supplied parameters; call sites
    /// control the literal text. The optional command timeout is passed
    /// through verbatim as the connection's busy timeout. The per-call
    /// connection is released when the call returns, on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the query
    /// fails.
    pub fn sql<Row, R, F>(
        &self,
        query: &str,
        command_timeout: Option<Duration>,
        loader: F,
    ) -> Result<R>
    where
        Row: QueryableByName<Sqlite> + 'static,
        F: FnOnce(Vec<Row>) -> R,
    {
        let mut conn = establish_connection(&self.database_url)?;
        if let Some(timeout) = command_timeout {
            sql_query(format!("PRAGMA busy_timeout = {};", timeout.as_millis()))
                .execute(&mut conn)?;
        }

        let rows = sql_query(query).load::<Row>(&mut conn)?;
        Ok(loader(rows))
    }
}

fn establish_connection(database_url: &str) -> Result<SqliteConnection> {
    debug!("Establishing connection to {database_url}");
    let mut conn = SqliteConnection::establish(database_url)?;

    // Required relations rely on SQLite actually checking foreign keys
    sql_query("PRAGMA foreign_keys = ON;").execute(&mut conn)?;

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        migration::apply_migrations,
        models::{NewCuratedFeed, NewCuratedPackage, NewUser, User},
    };

    #[derive(QueryableByName)]
    struct TotalRow {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        total: i64,
    }

    fn setup_database(dir: &TempDir) -> String {
        let url = dir.path().join("gallery.db").display().to_string();
        let mut conn = SqliteConnection::establish(&url).unwrap();
        apply_migrations(&mut conn).unwrap();
        url
    }

    fn sample_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            email_address: Some(format!("{name}@example.org")),
            email_allowed: true,
            created_date: "2011-07-01T00:00:00Z".to_string(),
            ..NewUser::default()
        }
    }

    #[test]
    fn test_construction_does_no_io() {
        let ctx = GalleryContext::new("/nonexistent/dir/gallery.db", false);
        assert_eq!(ctx.database_url(), "/nonexistent/dir/gallery.db");
        assert!(!ctx.read_only());
    }

    #[test]
    fn test_read_only_save_fails_without_touching_store() {
        let dir = tempfile::tempdir().unwrap();
        let url = setup_database(&dir);

        let mut ctx = GalleryContext::new(&url, true);
        assert!(ctx.read_only());
        ctx.users.add(sample_user("alice"));

        let err = ctx.save_changes().unwrap_err();
        assert!(matches!(err, DbError::ReadOnlyMode));
        assert!(err.to_string().contains("read only mode"));

        let mut conn = SqliteConnection::establish(&url).unwrap();
        let count: i64 = schema::users::table
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_read_only_rejects_uniformly_across_entity_types() {
        // the target is never touched, so a bogus path proves no I/O happens
        let mut ctx = GalleryContext::new("/nonexistent/dir/gallery.db", true);

        ctx.curated_feeds.add(NewCuratedFeed {
            name: "vetted".to_string(),
        });
        assert!(matches!(ctx.save_changes(), Err(DbError::ReadOnlyMode)));

        ctx.package_registrations.remove(1);
        assert!(matches!(ctx.save_changes(), Err(DbError::ReadOnlyMode)));
    }

    #[test]
    fn test_save_changes_flushes_and_reports_affected_rows() {
        let dir = tempfile::tempdir().unwrap();
        let url = setup_database(&dir);

        let mut ctx = GalleryContext::new(&url, false);
        ctx.users.add(sample_user("alice"));
        ctx.users.add(sample_user("bob"));
        ctx.curated_feeds.add(NewCuratedFeed {
            name: "vetted".to_string(),
        });

        let affected = ctx.save_changes().unwrap();
        assert_eq!(affected, 3);
        assert!(!ctx.has_pending_changes());

        let users: Vec<User> = schema::users::table
            .select(User::as_select())
            .load(ctx.connection().unwrap())
            .unwrap();
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_save_changes_with_nothing_pending_is_noop() {
        let mut ctx = GalleryContext::new("/nonexistent/dir/gallery.db", false);
        assert_eq!(ctx.save_changes().unwrap(), 0);
    }

    #[test]
    fn test_remove_flushes_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let url = setup_database(&dir);

        let mut ctx = GalleryContext::new(&url, false);
        ctx.users.add(sample_user("alice"));
        ctx.users.add(sample_user("bob"));
        ctx.save_changes().unwrap();

        let alice: User = schema::users::table
            .filter(schema::users::username.eq("alice"))
            .select(User::as_select())
            .first(ctx.connection().unwrap())
            .unwrap();

        ctx.users.remove(alice.id);
        assert_eq!(ctx.save_changes().unwrap(), 1);

        let remaining: i64 = schema::users::table
            .count()
            .get_result(ctx.connection().unwrap())
            .unwrap();
        assert_eq!(remaining, 1);
    }

    #[test]
    fn test_required_relations_reject_orphan_children() {
        let dir = tempfile::tempdir().unwrap();
        let url = setup_database(&dir);

        let mut ctx = GalleryContext::new(&url, false);
        ctx.curated_packages.add(NewCuratedPackage {
            curated_feed_id: 999,
            package_registration_id: 999,
            ..NewCuratedPackage::default()
        });

        assert!(matches!(ctx.save_changes(), Err(DbError::QueryError(_))));
        // failed flushes keep their pending operations
        assert!(ctx.has_pending_changes());
    }

    #[test]
    fn test_sql_helper_returns_loader_literal_on_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let url = setup_database(&dir);

        // the raw read path works on a read-only context
        let ctx = GalleryContext::new(&url, true);
        let value = ctx
            .sql::<TotalRow, _, _>(
                "SELECT download_count AS total FROM package_registrations",
                None,
                |rows| if rows.is_empty() { 42 } else { rows[0].total },
            )
            .unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_sql_helper_passes_command_timeout_through() {
        let dir = tempfile::tempdir().unwrap();
        let url = setup_database(&dir);

        let ctx = GalleryContext::new(&url, false);
        let total = ctx
            .sql::<TotalRow, _, _>(
                "SELECT COUNT(*) AS total FROM users",
                Some(Duration::from_millis(1500)),
                |rows| rows[0].total,
            )
            .unwrap();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_sql_helper_releases_connection_on_error_path() {
        let dir = tempfile::tempdir().unwrap();
        let url = setup_database(&dir);

        let mut ctx = GalleryContext::new(&url, false);
        let err = ctx
            .sql::<TotalRow, _, _>("SELECT nope FROM missing", None, |rows| rows.len())
            .unwrap_err();
        assert!(matches!(err, DbError::QueryError(_)));

        // the per-call connection is gone; the same target accepts writes
        ctx.users.add(sample_user("carol"));
        assert_eq!(ctx.save_changes().unwrap(), 1);
    }
}
