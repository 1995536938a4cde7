//! Repository for `tab_criterio_alerta`.
//!
//! Rows are addressed by the composite key `(id_sensor, id_grandeza)`;
//! every update and delete binds both columns.

use sqlx::PgPool;

use crate::models::alert_criterion::{AlertCriterion, CriterionKey, SaveAlertCriterion};

const COLUMNS: &str = "id_sensor AS sensor_id, id_grandeza AS quantity_id, \
    comparacao AS comparison, valor_critico_1 AS critical_value, \
    valor_critico_2 AS critical_value_upper, alerta AS message, \
    repeticao_seg AS repeat_secs, ativo AS active";

/// Default seconds between repeated alerts when none is given.
const DEFAULT_REPEAT_SECS: i32 = 600;

/// Provides CRUD operations for alert criteria.
pub struct AlertCriterionRepo;

impl AlertCriterionRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<AlertCriterion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tab_criterio_alerta ORDER BY id_sensor, id_grandeza");
        sqlx::query_as::<_, AlertCriterion>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert a new criterion, or update the one at `input.key`.
    pub async fn save(
        pool: &PgPool,
        input: &SaveAlertCriterion,
    ) -> Result<Option<AlertCriterion>, sqlx::Error> {
        match input.key {
            None => {
                let query = format!(
                    "INSERT INTO tab_criterio_alerta
                        (id_sensor, id_grandeza, comparacao, valor_critico_1, valor_critico_2,
                         alerta, repeticao_seg, ativo)
                     VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, $9), COALESCE($8, TRUE))
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, AlertCriterion>(&query)
                    .bind(input.sensor_id)
                    .bind(input.quantity_id)
                    .bind(input.comparison.as_str())
                    .bind(input.critical_value)
                    .bind(input.critical_value_upper)
                    .bind(&input.message)
                    .bind(input.repeat_secs)
                    .bind(input.active)
                    .bind(DEFAULT_REPEAT_SECS)
                    .fetch_one(pool)
                    .await
                    .map(Some)
            }
            Some(CriterionKey {
                sensor_id,
                quantity_id,
            }) => {
                let query = format!(
                    "UPDATE tab_criterio_alerta SET
                        id_sensor = $3,
                        id_grandeza = $4,
                        comparacao = $5,
                        valor_critico_1 = $6,
                        valor_critico_2 = $7,
                        alerta = $8,
                        repeticao_seg = COALESCE($9, repeticao_seg),
                        ativo = COALESCE($10, ativo)
                     WHERE id_sensor = $1 AND id_grandeza = $2
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, AlertCriterion>(&query)
                    .bind(sensor_id)
                    .bind(quantity_id)
                    .bind(input.sensor_id)
                    .bind(input.quantity_id)
                    .bind(input.comparison.as_str())
                    .bind(input.critical_value)
                    .bind(input.critical_value_upper)
                    .bind(&input.message)
                    .bind(input.repeat_secs)
                    .bind(input.active)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Delete the criterion at `key`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, key: CriterionKey) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM tab_criterio_alerta WHERE id_sensor = $1 AND id_grandeza = $2")
                .bind(key.sensor_id)
                .bind(key.quantity_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
