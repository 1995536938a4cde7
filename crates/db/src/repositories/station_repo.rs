//! Repository for `tab_estacao`.

use campo_core::types::DbId;
use sqlx::PgPool;

use crate::models::station::{SaveStation, Station};

const COLUMNS: &str = "id_estacao AS id, id_propriedade AS property_id, nome_estacao AS name, \
    descricao_estacao AS description, operacao_inicio AS operation_start, \
    operacao_fim AS operation_end";

/// Provides CRUD operations for weather stations.
pub struct StationRepo;

impl StationRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Station>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tab_estacao ORDER BY nome_estacao ASC");
        sqlx::query_as::<_, Station>(&query).fetch_all(pool).await
    }

    /// Insert or update a station, returning the stored row.
    pub async fn save(pool: &PgPool, input: &SaveStation) -> Result<Option<Station>, sqlx::Error> {
        match input.id {
            None => {
                let query = format!(
                    "INSERT INTO tab_estacao
                        (id_propriedade, nome_estacao, descricao_estacao, operacao_inicio, operacao_fim)
                     VALUES ($1, $2, $3, COALESCE($4, NOW()), $5)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Station>(&query)
                    .bind(input.property_id)
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
                    "UPDATE tab_estacao SET
                        id_propriedade = $2,
                        nome_estacao = $3,
                        descricao_estacao = $4,
                        operacao_inicio = COALESCE($5, operacao_inicio),
                        operacao_fim = $6
                     WHERE id_estacao = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Station>(&query)
                    .bind(id)
                    .bind(input.property_id)
                    .bind(&input.name)
                    .bind(&input.description)
                    .bind(input.operation_start)
                    .bind(input.operation_end)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Delete a station by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tab_estacao WHERE id_estacao = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
