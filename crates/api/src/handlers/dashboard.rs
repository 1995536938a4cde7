//! Handlers for the live dashboard (`/dashboard`).
//!
//! All reads take the crop's session lock briefly and copy out what they
//! need; none of them wait on the generation service except
//! [`get_field_image`].

use axum::extract::{Path, Query, State};
use axum::Json;
use campo_core::alert::AlertEntry;
use campo_core::error::CoreError;
use campo_core::history::{HistoryEntry, Period};
use campo_core::seed::PropertySummary;
use campo_core::thresholds::ThresholdMap;
use serde::Serialize;

use crate::dashboard::{CropSnapshot, FieldImage};
use crate::error::AppResult;
use crate::query::HistoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/properties
pub async fn list_properties(State(state): State<AppState>) -> Json<DataResponse<Vec<PropertySummary>>> {
    Json(DataResponse {
        data: state.dashboard.properties().to_vec(),
    })
}

/// GET /api/v1/dashboard/properties/{property_id}
pub async fn get_property(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> AppResult<Json<DataResponse<PropertySummary>>> {
    let property = state.dashboard.property(&property_id)?.clone();
    Ok(Json(DataResponse { data: property }))
}

/// GET /api/v1/dashboard/crops
pub async fn list_crops(State(state): State<AppState>) -> Json<DataResponse<Vec<CropSnapshot>>> {
    let mut data = Vec::new();
    for monitor in state.dashboard.monitors() {
        data.push(CropSnapshot::of(&*monitor.session().read().await));
    }
    Json(DataResponse { data })
}

/// GET /api/v1/dashboard/crops/{crop_id}
pub async fn get_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<Json<DataResponse<CropSnapshot>>> {
    let monitor = state.dashboard.monitor(&crop_id)?;
    let snapshot = CropSnapshot::of(&*monitor.session().read().await);
    Ok(Json(DataResponse { data: snapshot }))
}

/// Chart series for one period.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub period: Period,
    pub entries: Vec<HistoryEntry>,
}

/// GET /api/v1/dashboard/crops/{crop_id}/history?period=24h|7d|30d
pub async fn get_history(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<DataResponse<HistoryResponse>>> {
    let period = match params.period.as_deref() {
        Some(raw) => raw.parse::<Period>()?,
        None => Period::default(),
    };

    let monitor = state.dashboard.monitor(&crop_id)?;
    let entries = monitor
        .session()
        .read()
        .await
        .history()
        .slice(period)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse {
        data: HistoryResponse { period, entries },
    }))
}

/// GET /api/v1/dashboard/crops/{crop_id}/alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<AlertEntry>>>> {
    let monitor = state.dashboard.monitor(&crop_id)?;
    let alerts = monitor.session().read().await.alerts().iter().cloned().collect();
    Ok(Json(DataResponse { data: alerts }))
}

/// GET /api/v1/dashboard/crops/{crop_id}/image
pub async fn get_field_image(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<Json<DataResponse<FieldImage>>> {
    let image = state.dashboard.field_image(&crop_id).await?;
    Ok(Json(DataResponse { data: image }))
}

/// PUT /api/v1/dashboard/crops/{crop_id}/thresholds
///
/// Replaces the whole map. Takes effect from the next tick.
pub async fn update_thresholds(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
    Json(thresholds): Json<ThresholdMap>,
) -> AppResult<Json<DataResponse<ThresholdMap>>> {
    let monitor = state.dashboard.monitor(&crop_id)?;
    for (kind, threshold) in &thresholds {
        if let (Some(min), Some(max)) = (threshold.min, threshold.max) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "{} threshold has min {min} above max {max}",
                    kind.label()
                ))
                .into());
            }
        }
    }

    monitor.session().write().await.set_thresholds(thresholds.clone());
    tracing::info!(crop_id = %crop_id, sensors = thresholds.len(), "Thresholds updated");

    Ok(Json(DataResponse { data: thresholds }))
}

/// Result of a reset.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub crop_id: String,
    pub generation: u64,
}

/// POST /api/v1/dashboard/crops/{crop_id}/reset
///
/// Restores the seed state. A tick already waiting on the advisor is
/// discarded when it completes.
pub async fn reset_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<Json<DataResponse<ResetResponse>>> {
    let generation = state.dashboard.monitor(&crop_id)?.reset().await;
    tracing::info!(crop_id = %crop_id, generation, "Crop session reset");
    Ok(Json(DataResponse {
        data: ResetResponse {
            crop_id,
            generation,
        },
    }))
}
