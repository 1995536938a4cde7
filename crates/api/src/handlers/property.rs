//! Handlers for `/admin/properties` (`tab_propriedade`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campo_core::error::CoreError;
use campo_core::types::DbId;
use campo_db::models::property::{Property, SaveProperty};
use campo_db::repositories::PropertyRepo;

use super::{deleted_or_not_found, list_or_empty, require, save_status};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/properties
pub async fn list_properties(State(state): State<AppState>) -> Json<DataResponse<Vec<Property>>> {
    let data = list_or_empty("Property", PropertyRepo::list(&state.pool).await);
    Json(DataResponse { data })
}

/// POST /api/v1/admin/properties
pub async fn save_property(
    State(state): State<AppState>,
    Json(mut input): Json<SaveProperty>,
) -> AppResult<(StatusCode, Json<DataResponse<Property>>)> {
    input.normalize();
    require("name", &input.name)?;
    require("municipality", &input.municipality)?;
    if input.state.chars().count() != 2 {
        return Err(AppError::Core(CoreError::Validation(
            "state must be a two-letter code".into(),
        )));
    }

    let property = PropertyRepo::save(&state.pool, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Property", input.id.unwrap_or_default()))?;

    tracing::info!(property_id = property.id, created = input.id.is_none(), "Property saved");
    Ok((save_status(input.id.is_none()), Json(DataResponse { data: property })))
}

/// DELETE /api/v1/admin/properties/{id}
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PropertyRepo::delete(&state.pool, id).await?;
    deleted_or_not_found(deleted, "Property", id)
}
