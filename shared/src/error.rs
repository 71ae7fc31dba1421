use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    /// The requested time slot overlaps an existing blocking reservation.
    #[error("{0}")]
    ReservationConflict(String),
    /// The store aborted the transaction because a concurrent writer got
    /// there first (SQLSTATE 40001). Safe to retry.
    #[error("concurrent update detected, please retry: {0}")]
    SerializationConflict(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("transaction error")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation error")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("key value store error")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("password hashing error")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("authentication required")]
    UnauthenticatedError,
    #[error("invalid email or password")]
    UnauthorizedError,
    #[error("forbidden")]
    ForbiddenOperation,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReservationConflict(_) | AppError::SerializationConflict(_) => {
                StatusCode::CONFLICT
            }
            AppError::ValidationError(_) | AppError::ConvertToUuidError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "server error occurred"
            );
            // 5xx detail stays in the log.
            return (status_code, Json(json!({"error": "internal server error"})))
                .into_response();
        }
        (status_code, Json(json!({"error": self.to_string()}))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::EntityNotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::ReservationConflict("x".into()), StatusCode::CONFLICT)]
    #[case(AppError::SerializationConflict("x".into()), StatusCode::CONFLICT)]
    #[case(AppError::UnprocessableEntity("x".into()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(AppError::ForbiddenOperation, StatusCode::FORBIDDEN)]
    #[case(AppError::UnauthenticatedError, StatusCode::UNAUTHORIZED)]
    #[case(AppError::NoRowsAffectedError("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn error_maps_to_expected_status(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }
}
