//! Embedded schema migrations for the gallery database.
//!
//! The factory exists so out-of-band tooling can run these: migrations must
//! be able to write even when the running application is in read-only mode,
//! and an empty migration run must still succeed.

use std::collections::HashSet;

use diesel::{prelude::*, sql_query, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

use crate::{
    error::{DbError, Result},
    model,
};

pub const GALLERY_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/gallery");

/// Applies all pending migrations, then verifies the live schema against
/// the relational model.
///
/// # Errors
///
/// Returns an error if a migration fails or the resulting schema is missing
/// a declared table.
pub fn apply_migrations(conn: &mut SqliteConnection) -> Result<()> {
    loop {
        match conn.run_pending_migrations(GALLERY_MIGRATIONS) {
            Ok(applied) => {
                debug!("Applied {} pending migrations", applied.len());
                break;
            }
            Err(e) if e.to_string().contains("already exists") => {
                mark_first_pending(conn)?;
            }
            Err(e) => return Err(DbError::MigrationError(e.to_string())),
        }
    }

    verify_schema(conn)
}

fn mark_first_pending(conn: &mut SqliteConnection) -> Result<()> {
    let pending = conn
        .pending_migrations(GALLERY_MIGRATIONS)
        .map_err(|e| DbError::MigrationError(e.to_string()))?;
    if let Some(first) = pending.first() {
        sql_query("INSERT INTO __diesel_schema_migrations (version) VALUES (?1)")
            .bind::<diesel::sql_types::Text, _>(first.name().version().to_string())
            .execute(conn)?;
    }

    Ok(())
}

#[derive(QueryableByName)]
struct MasterRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}

/// Checks that every table declared in the relational model exists in the
/// live database.
pub fn verify_schema(conn: &mut SqliteConnection) -> Result<()> {
    let rows: Vec<MasterRow> =
        sql_query("SELECT name FROM sqlite_master WHERE type = 'table'").load(conn)?;
    let live: HashSet<&str> = rows.iter().map(|r| r.name.as_str()).collect();

    for table in model::relational_model().table_names() {
        if !live.contains(table) {
            return Err(DbError::IntegrityError(format!(
                "missing table: {table}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_conn() -> SqliteConnection {
        SqliteConnection::establish(":memory:").unwrap()
    }

    #[test]
    fn test_migrations_apply_to_empty_database() {
        let mut conn = setup_conn();
        apply_migrations(&mut conn).unwrap();
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let mut conn = setup_conn();
        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();
    }

    #[test]
    fn test_verify_schema_fails_before_migrations() {
        let mut conn = setup_conn();
        assert!(matches!(
            verify_schema(&mut conn),
            Err(DbError::IntegrityError(_))
        ));
    }

    #[test]
    fn test_verify_schema_sees_join_tables() {
        let mut conn = setup_conn();
        apply_migrations(&mut conn).unwrap();

        let rows: Vec<MasterRow> =
            sql_query("SELECT name FROM sqlite_master WHERE type = 'table'")
                .load(&mut conn)
                .unwrap();
        let live: HashSet<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        for join in &model::relational_model().join_tables {
            assert!(live.contains(join.table), "{} missing", join.table);
        }
    }
}
