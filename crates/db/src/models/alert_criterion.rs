//! Alert criterion model (`tab_criterio_alerta`).
//!
//! The table has no surrogate key: a criterion is identified by the pair
//! (sensor, quantity).

use campo_core::comparison::Comparison;
use campo_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Composite key of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionKey {
    pub sensor_id: DbId,
    pub quantity_id: DbId,
}

/// A row from `tab_criterio_alerta`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AlertCriterion {
    pub sensor_id: DbId,
    pub quantity_id: DbId,
    #[sqlx(try_from = "String")]
    pub comparison: Comparison,
    pub critical_value: f64,
    /// Upper bound, only used by [`Comparison::Between`].
    pub critical_value_upper: Option<f64>,
    pub message: String,
    /// Minimum seconds between repeated alerts.
    pub repeat_secs: i32,
    pub active: bool,
}

impl AlertCriterion {
    pub fn key(&self) -> CriterionKey {
        CriterionKey {
            sensor_id: self.sensor_id,
            quantity_id: self.quantity_id,
        }
    }
}

/// DTO for creating or updating a criterion.
///
/// `key` names the row being edited; when absent a new row is inserted.
/// An update may move the criterion to a different (sensor, quantity) pair.
#[derive(Debug, Deserialize)]
pub struct SaveAlertCriterion {
    pub key: Option<CriterionKey>,
    pub sensor_id: DbId,
    pub quantity_id: DbId,
    pub comparison: Comparison,
    pub critical_value: f64,
    pub critical_value_upper: Option<f64>,
    pub message: String,
    pub repeat_secs: Option<i32>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_dto_accepts_symbolic_operator() {
        let dto: SaveAlertCriterion = serde_json::from_str(
            r#"{"key":null,"sensor_id":1,"quantity_id":2,"comparison":"entre",
                "critical_value":10,"critical_value_upper":20,"message":"out of band"}"#,
        )
        .unwrap();
        assert_eq!(dto.comparison, Comparison::Between);
        assert_eq!(dto.repeat_secs, None);
    }
}
