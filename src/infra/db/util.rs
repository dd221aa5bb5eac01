//! Translation from sqlx failures to the repository error vocabulary.

use sqlx::error::DatabaseError;

use crate::application::repos::RepoError;

// Postgres SQLSTATE codes the services distinguish.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const QUERY_CANCELED: &str = "57014";

pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::Database(db) => map_database_error(db),
        other => RepoError::from_persistence(other),
    }
}

fn map_database_error(db: Box<dyn DatabaseError>) -> RepoError {
    let code = db.code().map(|code| code.into_owned());
    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => RepoError::Duplicate {
            constraint: db.constraint().unwrap_or("unknown").to_string(),
        },
        Some(QUERY_CANCELED) => RepoError::Timeout,
        // Class 22: malformed data (bad uuid, out-of-range value).
        Some(FOREIGN_KEY_VIOLATION) | Some("22P02") => RepoError::InvalidInput {
            message: db.message().to_string(),
        },
        Some(code) if code.starts_with("22") => RepoError::InvalidInput {
            message: db.message().to_string(),
        },
        // Remaining class 23: check and not-null violations.
        Some(code) if code.starts_with("23") => RepoError::Integrity {
            message: db.message().to_string(),
        },
        _ => RepoError::from_persistence(db.message()),
    }
}
