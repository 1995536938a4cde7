//! Measured quantity model (`tab_grandeza`).

use campo_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `tab_grandeza`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Quantity {
    pub id: DbId,
    pub name: String,
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveQuantity {
    pub id: Option<DbId>,
    pub name: String,
    pub unit: Option<String>,
    pub description: Option<String>,
}
