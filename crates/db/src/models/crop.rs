//! Planted crop model (`tab_cultura`).

use campo_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `tab_cultura`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CropRecord {
    pub id: DbId,
    pub property_id: DbId,
    /// Crop kind as entered (`produto`), e.g. "Soja".
    pub product: String,
    /// Field name (`nome_cultura`).
    pub name: String,
}

/// DTO for creating (`id` absent) or updating a crop.
#[derive(Debug, Deserialize)]
pub struct SaveCrop {
    pub id: Option<DbId>,
    pub property_id: DbId,
    pub product: String,
    pub name: String,
}
