//! Weather station model (`tab_estacao`).

use campo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `tab_estacao`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Station {
    pub id: DbId,
    pub property_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub operation_start: Timestamp,
    pub operation_end: Option<Timestamp>,
}

/// DTO for creating (`id` absent) or updating a station.
#[derive(Debug, Deserialize)]
pub struct SaveStation {
    pub id: Option<DbId>,
    pub property_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub operation_start: Option<Timestamp>,
    pub operation_end: Option<Timestamp>,
}
