//! Handlers for `/admin/stations` (`tab_estacao`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campo_core::error::CoreError;
use campo_core::types::DbId;
use campo_db::models::station::{SaveStation, Station};
use campo_db::repositories::StationRepo;

use super::{deleted_or_not_found, list_or_empty, require, save_status};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/stations
pub async fn list_stations(State(state): State<AppState>) -> Json<DataResponse<Vec<Station>>> {
    let data = list_or_empty("Station", StationRepo::list(&state.pool).await);
    Json(DataResponse { data })
}

/// POST /api/v1/admin/stations
pub async fn save_station(
    State(state): State<AppState>,
    Json(input): Json<SaveStation>,
) -> AppResult<(StatusCode, Json<DataResponse<Station>>)> {
    require("name", &input.name)?;

    let station = StationRepo::save(&state.pool, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Station", input.id.unwrap_or_default()))?;
    Ok((save_status(input.id.is_none()), Json(DataResponse { data: station })))
}

/// DELETE /api/v1/admin/stations/{id}
pub async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StationRepo::delete(&state.pool, id).await?;
    deleted_or_not_found(deleted, "Station", id)
}
