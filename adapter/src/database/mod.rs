use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{postgres::PgConnectOptions, PgPool};

pub mod model;

fn make_pg_connect_options(cfg: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.username)
        .password(&cfg.password)
        .database(&cfg.database)
}

#[derive(Clone)]
pub struct ConnectionPool(PgPool);

impl ConnectionPool {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &PgPool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Postgres>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> ConnectionPool {
    ConnectionPool(PgPool::connect_lazy_with(make_pg_connect_options(cfg)))
}

const SERIALIZATION_FAILURE: &str = "40001";

/// Queries inside a SERIALIZABLE transaction can be aborted when a
/// concurrent writer commits first; surface that as a retryable conflict
/// instead of a plain store fault.
pub fn map_query_error(e: sqlx::Error) -> AppError {
    match serialization_failure(&e) {
        Some(message) => AppError::SerializationConflict(message),
        None => AppError::SpecificOperationError(e),
    }
}

/// Same distinction for commit/begin, where Postgres also reports
/// serialization failures.
pub fn map_transaction_error(e: sqlx::Error) -> AppError {
    match serialization_failure(&e) {
        Some(message) => AppError::SerializationConflict(message),
        None => AppError::TransactionError(e),
    }
}

fn serialization_failure(e: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.code().as_deref() == Some(SERIALIZATION_FAILURE) {
            return Some(db_err.message().to_string());
        }
    }
    None
}
