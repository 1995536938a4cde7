//! Handlers for `/admin/alert-criteria` (`tab_criterio_alerta`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campo_core::error::CoreError;
use campo_core::types::DbId;
use campo_db::models::alert_criterion::{AlertCriterion, CriterionKey, SaveAlertCriterion};
use campo_db::repositories::AlertCriterionRepo;

use super::{deleted_or_not_found, list_or_empty, require, save_status};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/alert-criteria
pub async fn list_alert_criteria(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<AlertCriterion>>> {
    let data = list_or_empty("AlertCriterion", AlertCriterionRepo::list(&state.pool).await);
    Json(DataResponse { data })
}

/// POST /api/v1/admin/alert-criteria
///
/// Inserts when `key` is absent, otherwise updates the row at `key`.
pub async fn save_alert_criterion(
    State(state): State<AppState>,
    Json(input): Json<SaveAlertCriterion>,
) -> AppResult<(StatusCode, Json<DataResponse<AlertCriterion>>)> {
    require("message", &input.message)?;
    input.comparison.validate(input.critical_value_upper)?;
    if input.repeat_secs.is_some_and(|secs| secs < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "repeat_secs must not be negative".into(),
        )));
    }

    let criterion = AlertCriterionRepo::save(&state.pool, &input)
        .await?
        .ok_or_else(|| match input.key {
            Some(key) => CoreError::not_found("AlertCriterion", format_key(key)),
            None => CoreError::Internal("insert returned no row".into()),
        })?;
    Ok((save_status(input.key.is_none()), Json(DataResponse { data: criterion })))
}

/// DELETE /api/v1/admin/alert-criteria/{sensor_id}/{quantity_id}
pub async fn delete_alert_criterion(
    State(state): State<AppState>,
    Path((sensor_id, quantity_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let key = CriterionKey {
        sensor_id,
        quantity_id,
    };
    let deleted = AlertCriterionRepo::delete(&state.pool, key).await?;
    deleted_or_not_found(deleted, "AlertCriterion", format_key(key))
}

fn format_key(key: CriterionKey) -> String {
    format!("{}/{}", key.sensor_id, key.quantity_id)
}
