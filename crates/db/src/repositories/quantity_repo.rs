//! Repository for `tab_grandeza`.

use campo_core::types::DbId;
use sqlx::PgPool;

use crate::models::quantity::{Quantity, SaveQuantity};

const COLUMNS: &str = "id_grandeza AS id, nome_grandeza AS name, unidade_medida AS unit, \
    descricao_grandeza AS description";

/// Provides CRUD operations for measured quantities.
pub struct QuantityRepo;

impl QuantityRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Quantity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tab_grandeza ORDER BY nome_grandeza ASC");
        sqlx::query_as::<_, Quantity>(&query).fetch_all(pool).await
    }

    pub async fn save(pool: &PgPool, input: &SaveQuantity) -> Result<Option<Quantity>, sqlx::Error> {
        match input.id {
            None => {
                let query = format!(
                    "INSERT INTO tab_grandeza (nome_grandeza, unidade_medida, descricao_grandeza)
                     VALUES ($1, $2, $3)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Quantity>(&query)
                    .bind(&input.name)
                    .bind(&input.unit)
                    .bind(&input.description)
                    .fetch_one(pool)
                    .await
                    .map(Some)
            }
            Some(id) => {
                let query = format!(
                    "UPDATE tab_grandeza SET
                        nome_grandeza = $2, unidade_medida = $3, descricao_grandeza = $4
                     WHERE id_grandeza = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Quantity>(&query)
                    .bind(id)
                    .bind(&input.name)
                    .bind(&input.unit)
                    .bind(&input.description)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Delete a quantity by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tab_grandeza WHERE id_grandeza = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
