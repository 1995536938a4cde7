//! Repository for `tab_sensor`.

use campo_core::types::DbId;
use sqlx::PgPool;

use crate::models::sensor::{SaveSensor, Sensor};

const COLUMNS: &str = "id_sensor AS id, id_estacao AS station_id, nome_sensor AS name, \
    descricao_sensor AS description, operacao_inicio AS operation_start, \
    operacao_fim AS operation_end";

/// Provides CRUD operations for sensors.
pub struct SensorRepo;

impl SensorRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Sensor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tab_sensor ORDER BY id_estacao, nome_sensor");
        sqlx::query_as::<_, Sensor>(&query).fetch_all(pool).await
    }

    /// Insert or update a sensor, returning the stored row.
    pub async fn save(pool: &PgPool, input: &SaveSensor) -> Result<Option<Sensor>, sqlx::Error> {
        match input.id {
            None => {
                let query = format!(
                    "INSERT INTO tab_sensor
                        (id_estacao, nome_sensor, descricao_sensor, operacao_inicio, operacao_fim)
                     VALUES ($1, $2, $3, COALESCE($4, NOW()), $5)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Sensor>(&query)
                    .bind(input.station_id)
                    .bind(&input.name)
                    .bind(&input.description)
                    .bind(input.operation_start)
                    .bind(input.operation_end)
                    .fetch_one(pool)
                    .await
                    .map(Some)
            }
            Some(id) => {
                let query = format!(
                    "UPDATE tab_sensor SET
                        id_estacao = $2,
                        nome_sensor = $3,
                        descricao_sensor = $4,
                        operacao_inicio = COALESCE($5, operacao_inicio),
                        operacao_fim = $6
                     WHERE id_sensor = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Sensor>(&query)
                    .bind(id)
                    .bind(input.station_id)
                    .bind(&input.name)
                    .bind(&input.description)
                    .bind(input.operation_start)
                    .bind(input.operation_end)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Delete a sensor by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tab_sensor WHERE id_sensor = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
