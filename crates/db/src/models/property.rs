//! Farm property model (`tab_propriedade`).

use campo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `tab_propriedade`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Property {
    pub id: DbId,
    pub name: String,
    /// Two-letter state code (`uf`).
    pub state: String,
    pub municipality: String,
    pub operation_start: Timestamp,
    pub operation_end: Option<Timestamp>,
}

/// DTO for creating (`id` absent) or updating a property.
#[derive(Debug, Deserialize)]
pub struct SaveProperty {
    pub id: Option<DbId>,
    pub name: String,
    pub state: String,
    pub municipality: String,
    pub operation_start: Option<Timestamp>,
    pub operation_end: Option<Timestamp>,
}

impl SaveProperty {
    /// Trim text fields and upper-case the state code so it fits `uf`.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.municipality = self.municipality.trim().to_string();
        self.state = self.state.trim().to_uppercase();
    }
}
