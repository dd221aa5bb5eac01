use thiserror::Error;

/// Failures in process plumbing: sockets, the database connection,
/// configuration, telemetry installation.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("database: {0}")]
    Database(String),
    #[error("configuration: {0}")]
    Configuration(String),
    #[error("telemetry: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
