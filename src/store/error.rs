use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store could not be reached, or the link dropped mid-call.
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the statement. Holds the store's own message.
    #[error("{0}")]
    Statement(String),
}

impl StoreError {
    /// Classify an error raised while opening a connection
    pub fn connect(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }

    /// Classify an error raised while running a statement
    pub fn statement(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::Statement(db_err.message().to_string()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            other => StoreError::Statement(other.to_string()),
        }
    }
}
