//! Sensor model (`tab_sensor`).

use campo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `tab_sensor`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sensor {
    pub id: DbId,
    pub station_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub operation_start: Timestamp,
    pub operation_end: Option<Timestamp>,
}

/// DTO for creating (`id` absent) or updating a sensor.
#[derive(Debug, Deserialize)]
pub struct SaveSensor {
    pub id: Option<DbId>,
    pub station_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub operation_start: Option<Timestamp>,
    pub operation_end: Option<Timestamp>,
}
