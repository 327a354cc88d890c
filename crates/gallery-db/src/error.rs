//! Error types for gallery-db.

use miette::Diagnostic;
use thiserror::Error;

/// Database error type for gallery-db operations.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Save changes unavailable: the gallery is currently in read only mode, with limited service. Please try again later.")]
    #[diagnostic(
        code(gallery_db::read_only),
        help("Writes are refused deployment-wide; retry once read-only mode is lifted")
    )]
    ReadOnlyMode,

    #[error("Database connection failed: {0}")]
    #[diagnostic(
        code(gallery_db::connection),
        help("Check if the database file exists and is accessible")
    )]
    ConnectionError(String),

    #[error("Database query failed: {0}")]
    #[diagnostic(code(gallery_db::query))]
    QueryError(String),

    #[error("Database migration failed: {0}")]
    #[diagnostic(
        code(gallery_db::migration),
        help("The database schema may be out of date or corrupted")
    )]
    MigrationError(String),

    #[error("Record not found: {0}")]
    #[diagnostic(code(gallery_db::not_found))]
    NotFound(String),

    #[error("Database integrity error: {0}")]
    #[diagnostic(
        code(gallery_db::integrity),
        help("The live schema does not match the declared relational model")
    )]
    IntegrityError(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(gallery_db::io), help("Check file permissions and disk space"))]
    IoError(#[from] std::io::Error),
}

impl From<diesel::result::Error> for DbError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => DbError::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(_, info) => {
                DbError::QueryError(info.message().to_string())
            }
            other => DbError::QueryError(other.to_string()),
        }
    }
}

impl From<diesel::result::ConnectionError> for DbError {
    fn from(err: diesel::result::ConnectionError) -> Self {
        DbError::ConnectionError(err.to_string())
    }
}

/// Result type alias for gallery-db operations.
pub type Result<T> = std::result::Result<T, DbError>;
