//! Repository for `tab_cultura`.

use campo_core::types::DbId;
use sqlx::PgPool;

use crate::models::crop::{CropRecord, SaveCrop};

const COLUMNS: &str = "id_cultura AS id, id_propriedade AS property_id, \
    produto AS product, nome_cultura AS name";

/// Provides CRUD operations for planted crops.
pub struct CropRepo;

impl CropRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<CropRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tab_cultura ORDER BY id_propriedade, nome_cultura");
        sqlx::query_as::<_, CropRecord>(&query).fetch_all(pool).await
    }

    /// Insert or update a crop, returning the stored row.
    pub async fn save(pool: &PgPool, input: &SaveCrop) -> Result<Option<CropRecord>, sqlx::Error> {
        match input.id {
            None => {
                let query = format!(
                    "INSERT INTO tab_cultura (id_propriedade, produto, nome_cultura)
                     VALUES ($1, $2, $3)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, CropRecord>(&query)
                    .bind(input.property_id)
                    .bind(&input.product)
                    .bind(&input.name)
                    .fetch_one(pool)
                    .await
                    .map(Some)
            }
            Some(id) => {
                let query = format!(
                    "UPDATE tab_cultura SET id_propriedade = $2, produto = $3, nome_cultura = $4
                     WHERE id_cultura = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, CropRecord>(&query)
                    .bind(id)
                    .bind(input.property_id)
                    .bind(&input.product)
                    .bind(&input.name)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Delete a crop by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tab_cultura WHERE id_cultura = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
