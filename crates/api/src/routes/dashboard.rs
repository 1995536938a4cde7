//! Route definitions for the live dashboard.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;
use crate::ws;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET    /properties                     -> list_properties
/// GET    /properties/{property_id}       -> get_property
/// GET    /crops                          -> list_crops
/// GET    /crops/{crop_id}                -> get_crop
/// GET    /crops/{crop_id}/history        -> get_history (?period=24h|7d|30d)
/// GET    /crops/{crop_id}/alerts         -> list_alerts
/// GET    /crops/{crop_id}/image          -> get_field_image
/// PUT    /crops/{crop_id}/thresholds     -> update_thresholds
/// POST   /crops/{crop_id}/reset          -> reset_crop
/// GET    /ws                             -> live feed (?crop_id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/properties", get(dashboard::list_properties))
        .route("/properties/{property_id}", get(dashboard::get_property))
        .route("/crops", get(dashboard::list_crops))
        .route("/crops/{crop_id}", get(dashboard::get_crop))
        .route("/crops/{crop_id}/history", get(dashboard::get_history))
        .route("/crops/{crop_id}/alerts", get(dashboard::list_alerts))
        .route("/crops/{crop_id}/image", get(dashboard::get_field_image))
        .route("/crops/{crop_id}/thresholds", put(dashboard::update_thresholds))
        .route("/crops/{crop_id}/reset", post(dashboard::reset_crop))
        .route("/ws", get(ws::live_feed_handler))
}
