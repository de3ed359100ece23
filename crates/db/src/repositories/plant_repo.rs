//! Repository for the `plants` table.

use plantmon_core::types::DbId;
use sqlx::PgPool;

use crate::models::plant::{Plant, PlantInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, plant_type, location, description, image_url, image_key, \
                       created_at, updated_at";

/// Provides CRUD operations for plants.
pub struct PlantRepo;

impl PlantRepo {
    /// Insert a new plant, returning the created row.
    pub async fn create(pool: &PgPool, input: &PlantInput) -> Result<Plant, sqlx::Error> {
        let query = format!(
            "INSERT INTO plants (name, plant_type, location, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(&input.name)
            .bind(&input.plant_type)
            .bind(&input.location)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a plant by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE id = $1");
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a plant with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM plants WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List all plants ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Plant>(&query).fetch_all(pool).await
    }

    /// Replace the editable fields of a plant. The image is left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PlantInput,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET
                name = $2,
                plant_type = $3,
                location = $4,
                description = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.plant_type)
            .bind(&input.location)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Point the plant at a newly stored image.
    pub async fn set_image(
        pool: &PgPool,
        id: DbId,
        image_url: &str,
        image_key: &str,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET image_url = $2, image_key = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(image_url)
            .bind(image_key)
            .fetch_optional(pool)
            .await
    }

    /// Drop the plant's image reference.
    pub async fn clear_image(pool: &PgPool, id: DbId) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET image_url = NULL, image_key = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a plant, returning the removed row.
    ///
    /// Sensor outputs cascade; assigned devices become available.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("DELETE FROM plants WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
