//! Repository for the `devices` table.

use plantmon_core::types::DbId;
use sqlx::PgPool;

use crate::models::device::{CreateDevice, Device, UpdateDevice};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, device_name, plant_id, created_at, updated_at";

/// Provides CRUD operations and plant assignment for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Register a device, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (id, device_name, plant_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&input.id)
            .bind(&input.device_name)
            .bind(input.plant_id)
            .fetch_one(pool)
            .await
    }

    /// Find a device by its hardware id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the device assigned to a plant.
    pub async fn find_by_plant(
        pool: &PgPool,
        plant_id: DbId,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE plant_id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(plant_id)
            .fetch_optional(pool)
            .await
    }

    /// List every device ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices ORDER BY id ASC");
        sqlx::query_as::<_, Device>(&query).fetch_all(pool).await
    }

    /// List devices not assigned to any plant.
    pub async fn list_available(pool: &PgPool) -> Result<Vec<Device>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM devices WHERE plant_id IS NULL ORDER BY id ASC");
        sqlx::query_as::<_, Device>(&query).fetch_all(pool).await
    }

    /// Apply a partial update.
    ///
    /// `plant_id` is only written when the DTO carries the key, so an absent
    /// field keeps the current assignment and `Some(None)` clears it.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateDevice,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!(
            "UPDATE devices SET
                device_name = COALESCE($2, device_name),
                plant_id = CASE WHEN $3 THEN $4 ELSE plant_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .bind(&input.device_name)
            .bind(input.plant_id.is_some())
            .bind(input.plant_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a device. Returns `true` if a row was removed.
    ///
    /// Readings it reported keep their plant and lose the device reference.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
