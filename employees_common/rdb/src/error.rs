//! Database error handling module
//! Define custom error types for configuration resolution and session handling

use thiserror::Error;

/// Database operation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// One or more required component variables are absent or empty
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingConfiguration(Vec<String>),

    /// The engine rejected the resolved URL
    #[error("Error creating database engine: {0}")]
    EngineInitialization(String),

    /// The engine could not hand out a session
    #[error("Failed to open database session: {0}")]
    SessionAcquire(String),

    /// The session was already committed
    #[error("Database session is closed")]
    SessionClosed,

    /// General database error
    #[error("Database error: {0}")]
    Other(String),
}

impl From<sea_orm::DbErr> for DbError {
    fn from(err: sea_orm::DbErr) -> Self {
        DbError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_lists_every_field() {
        let error = DbError::MissingConfiguration(vec!["DB_USER".to_string(), "DB_NAME".to_string()]);
        assert_eq!(error.to_string(), "Missing required environment variables: DB_USER, DB_NAME");
    }

    #[test]
    fn test_from_db_err() {
        let error: DbError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(error, DbError::Other(ref msg) if msg.contains("boom")));
    }
}
