use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Query execution error: {0}")]
    QueryError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Check if this is an integrity constraint violation (bad client data
    /// rather than a store outage)
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Self::QueryError(e) => {
                if let Some(db_error) = e.as_database_error() {
                    // PostgreSQL integrity constraint violation codes
                    matches!(db_error.code().as_deref(),
                        Some("23505") | // unique_violation
                        Some("23503") | // foreign_key_violation
                        Some("23502")   // not_null_violation
                    )
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
