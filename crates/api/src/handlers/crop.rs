//! Handlers for `/admin/crops` (`tab_cultura`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campo_core::crop::CropKind;
use campo_core::error::CoreError;
use campo_core::types::DbId;
use campo_db::models::crop::{CropRecord, SaveCrop};
use campo_db::repositories::CropRepo;

use super::{deleted_or_not_found, list_or_empty, require, save_status};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/crops
pub async fn list_crops(State(state): State<AppState>) -> Json<DataResponse<Vec<CropRecord>>> {
    let data = list_or_empty("Crop", CropRepo::list(&state.pool).await);
    Json(DataResponse { data })
}

/// POST /api/v1/admin/crops
///
/// `product` must name a known crop kind in English or Portuguese.
pub async fn save_crop(
    State(state): State<AppState>,
    Json(input): Json<SaveCrop>,
) -> AppResult<(StatusCode, Json<DataResponse<CropRecord>>)> {
    require("name", &input.name)?;
    input.product.parse::<CropKind>()?;

    let crop = CropRepo::save(&state.pool, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Crop", input.id.unwrap_or_default()))?;
    Ok((save_status(input.id.is_none()), Json(DataResponse { data: crop })))
}

/// DELETE /api/v1/admin/crops/{id}
pub async fn delete_crop(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = CropRepo::delete(&state.pool, id).await?;
    deleted_or_not_found(deleted, "Crop", id)
}
