//! Handlers for `/admin/quantities` (`tab_grandeza`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campo_core::error::CoreError;
use campo_core::types::DbId;
use campo_db::models::quantity::{Quantity, SaveQuantity};
use campo_db::repositories::QuantityRepo;

use super::{deleted_or_not_found, list_or_empty, require, save_status};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/quantities
pub async fn list_quantities(State(state): State<AppState>) -> Json<DataResponse<Vec<Quantity>>> {
    let data = list_or_empty("Quantity", QuantityRepo::list(&state.pool).await);
    Json(DataResponse { data })
}

/// POST /api/v1/admin/quantities
pub async fn save_quantity(
    State(state): State<AppState>,
    Json(input): Json<SaveQuantity>,
) -> AppResult<(StatusCode, Json<DataResponse<Quantity>>)> {
    require("name", &input.name)?;

    let quantity = QuantityRepo::save(&state.pool, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Quantity", input.id.unwrap_or_default()))?;
    Ok((save_status(input.id.is_none()), Json(DataResponse { data: quantity })))
}

/// DELETE /api/v1/admin/quantities/{id}
pub async fn delete_quantity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = QuantityRepo::delete(&state.pool, id).await?;
    deleted_or_not_found(deleted, "Quantity", id)
}
