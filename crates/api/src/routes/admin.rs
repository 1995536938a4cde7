//! Route definitions for the admin tables.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{alert_criterion, crop, property, quantity, sensor, station};
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// `GET` lists (empty on database failure), `POST` creates or updates
/// depending on whether the body carries an id.
///
/// ```text
/// GET, POST  /properties          DELETE /properties/{id}
/// GET, POST  /crops               DELETE /crops/{id}
/// GET, POST  /stations            DELETE /stations/{id}
/// GET, POST  /sensors             DELETE /sensors/{id}
/// GET, POST  /quantities          DELETE /quantities/{id}
/// GET, POST  /alert-criteria      DELETE /alert-criteria/{sensor_id}/{quantity_id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/properties",
            get(property::list_properties).post(property::save_property),
        )
        .route("/properties/{id}", delete(property::delete_property))
        .route("/crops", get(crop::list_crops).post(crop::save_crop))
        .route("/crops/{id}", delete(crop::delete_crop))
        .route(
            "/stations",
            get(station::list_stations).post(station::save_station),
        )
        .route("/stations/{id}", delete(station::delete_station))
        .route("/sensors", get(sensor::list_sensors).post(sensor::save_sensor))
        .route("/sensors/{id}", delete(sensor::delete_sensor))
        .route(
            "/quantities",
            get(quantity::list_quantities).post(quantity::save_quantity),
        )
        .route("/quantities/{id}", delete(quantity::delete_quantity))
        .route(
            "/alert-criteria",
            get(alert_criterion::list_alert_criteria).post(alert_criterion::save_alert_criterion),
        )
        .route(
            "/alert-criteria/{sensor_id}/{quantity_id}",
            delete(alert_criterion::delete_alert_criterion),
        )
}
