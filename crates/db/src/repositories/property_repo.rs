//! Repository for `tab_propriedade`.

use campo_core::types::DbId;
use sqlx::PgPool;

use crate::models::property::{Property, SaveProperty};

/// Column list for property queries.
const COLUMNS: &str = "id_propriedade AS id, nome_propriedade AS name, uf AS state, \
    municipio AS municipality, operacao_inicio AS operation_start, operacao_fim AS operation_end";

/// Provides CRUD operations for farm properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// List all properties, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tab_propriedade ORDER BY nome_propriedade ASC");
        sqlx::query_as::<_, Property>(&query).fetch_all(pool).await
    }

    /// Insert or update a property, returning the stored row.
    pub async fn save(
        pool: &PgPool,
        input: &SaveProperty,
    ) -> Result<Option<Property>, sqlx::Error> {
        match input.id {
            None => {
                let query = format!(
                    "INSERT INTO tab_propriedade
                        (nome_propriedade, uf, municipio, operacao_inicio, operacao_fim)
                     VALUES ($1, $2, $3, COALESCE($4, NOW()), $5)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Property>(&query)
                    .bind(&input.name)
                    .bind(&input.state)
                    .bind(&input.municipality)
                    .bind(input.operation_start)
                    .bind(input.operation_end)
                    .fetch_one(pool)
                    .await
                    .map(Some)
            }
            Some(id) => {
                let query = format!(
                    "UPDATE tab_propriedade SET
                        nome_propriedade = $2,
                        uf = $3,
                        municipio = $4,
                        operacao_inicio = COALESCE($5, operacao_inicio),
                        operacao_fim = $6
                     WHERE id_propriedade = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Property>(&query)
                    .bind(id)
                    .bind(&input.name)
                    .bind(&input.state)
                    .bind(&input.municipality)
                    .bind(input.operation_start)
                    .bind(input.operation_end)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Delete a property by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tab_propriedade WHERE id_propriedade = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
