// =============================================================================
// Database Error Types
// =============================================================================
//
// Classified database failures. Raw sqlx errors are mapped into variants the
// engines can react to (conflict retry, duplicate phone reporting) instead of
// string-matching at every call site.
// =============================================================================

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found by ID or lookup key
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A customer with this phone number already exists
    #[error("phone number already registered: {phone}")]
    DuplicatePhone { phone: String },

    /// UNIQUE constraint violation (other than customer phone)
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),

    /// FOREIGN KEY constraint violation
    #[error("foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),

    /// Failed to establish a database connection
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failure during startup
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failure
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Connection pool exhausted
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Data stored in the database could not be decoded
    #[error("corrupt row data: {0}")]
    CorruptData(String),

    /// Catch-all for unexpected failures
    #[error("internal database error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "row",
                id: String::new(),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                if msg.contains("UNIQUE constraint failed") {
                    if msg.contains("customers.phone") {
                        // Phone is extracted by the caller where known;
                        // the constraint message only carries the column.
                        DbError::DuplicatePhone { phone: String::new() }
                    } else {
                        DbError::UniqueViolation(msg)
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation(msg)
                } else {
                    DbError::QueryFailed(msg)
                }
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DbError::ConnectionFailed(err.to_string())
            }
            sqlx::Error::Migrate(_) => DbError::MigrationFailed(err.to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl DbError {
    /// Convenience constructor for `NotFound`.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for UNIQUE violations on generated reference numbers, which the
    /// engines resolve by re-allocating the sequence and retrying.
    pub fn is_reference_conflict(&self) -> bool {
        matches!(self, DbError::UniqueViolation(msg)
            if msg.contains("appointment_number") || msg.contains("session_number"))
    }

    /// Attach the phone number to a `DuplicatePhone` produced from a raw
    /// constraint message. No-op for every other variant.
    pub fn with_phone(self, phone: &str) -> Self {
        match self {
            DbError::DuplicatePhone { .. } => DbError::DuplicatePhone {
                phone: phone.to_string(),
            },
            other => other,
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
