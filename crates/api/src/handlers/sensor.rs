//! Handlers for `/admin/sensors` (`tab_sensor`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campo_core::error::CoreError;
use campo_core::types::DbId;
use campo_db::models::sensor::{SaveSensor, Sensor};
use campo_db::repositories::SensorRepo;

use super::{deleted_or_not_found, list_or_empty, require, save_status};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/sensors
pub async fn list_sensors(State(state): State<AppState>) -> Json<DataResponse<Vec<Sensor>>> {
    let data = list_or_empty("Sensor", SensorRepo::list(&state.pool).await);
    Json(DataResponse { data })
}

/// POST /api/v1/admin/sensors
pub async fn save_sensor(
    State(state): State<AppState>,
    Json(input): Json<SaveSensor>,
) -> AppResult<(StatusCode, Json<DataResponse<Sensor>>)> {
    require("name", &input.name)?;

    let sensor = SensorRepo::save(&state.pool, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Sensor", input.id.unwrap_or_default()))?;
    Ok((save_status(input.id.is_none()), Json(DataResponse { data: sensor })))
}

/// DELETE /api/v1/admin/sensors/{id}
pub async fn delete_sensor(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SensorRepo::delete(&state.pool, id).await?;
    deleted_or_not_found(deleted, "Sensor", id)
}
