//! Request handlers.
//!
//! [`dashboard`] serves the in-memory crop sessions. The remaining
//! submodules provide `list`, `save` and `delete` for one admin table each,
//! delegating to the corresponding repository in `campo_db`.

pub mod alert_criterion;
pub mod crop;
pub mod dashboard;
pub mod property;
pub mod quantity;
pub mod sensor;
pub mod station;

use axum::http::StatusCode;
use campo_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// Admin listings render even when the database is down: the failure is
/// logged and an empty list is returned.
pub(crate) fn list_or_empty<T>(entity: &'static str, result: Result<Vec<T>, sqlx::Error>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(entity, error = %e, "Admin list failed, returning empty");
            Vec::new()
        }
    }
}

/// 201 for an insert, 200 for an update.
pub(crate) fn save_status(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// Map a `delete` outcome to 204, or 404 when no row matched.
pub(crate) fn deleted_or_not_found(
    deleted: bool,
    entity: &'static str,
    id: impl std::fmt::Display,
) -> AppResult<StatusCode> {
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(entity, id)))
    }
}

/// Reject blank required text fields.
pub(crate) fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be empty"
        ))));
    }
    Ok(())
}
