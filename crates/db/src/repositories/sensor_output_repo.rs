//! Repository for the `sensor_outputs` table.

use plantmon_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::sensor_output::{
    CreateSensorOutput, SensorOutput, SensorOutputFilter, SensorSummary,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, plant_id, device_id, recorded_at, temperature, soil_moisture, \
                       light_level, humidity";

/// Provides insert and query operations for sensor readings.
pub struct SensorOutputRepo;

impl SensorOutputRepo {
    /// Insert a reading stamped with the current server time.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSensorOutput,
    ) -> Result<SensorOutput, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_outputs
                (plant_id, device_id, temperature, soil_moisture, light_level, humidity)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorOutput>(&query)
            .bind(input.plant_id)
            .bind(&input.device_id)
            .bind(input.values.temperature)
            .bind(input.values.soil_moisture)
            .bind(input.values.light_level)
            .bind(input.values.humidity)
            .fetch_one(pool)
            .await
    }

    /// List a plant's readings newest first, within the filter's window and page.
    pub async fn list_by_plant(
        pool: &PgPool,
        plant_id: DbId,
        filter: &SensorOutputFilter,
    ) -> Result<Vec<SensorOutput>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_outputs
             WHERE plant_id = $1
               AND ($2::timestamptz IS NULL OR recorded_at >= $2)
               AND ($3::timestamptz IS NULL OR recorded_at <= $3)
             ORDER BY recorded_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, SensorOutput>(&query)
            .bind(plant_id)
            .bind(filter.since)
            .bind(filter.until)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Most recent reading for a plant, if any.
    pub async fn latest_for_plant(
        pool: &PgPool,
        plant_id: DbId,
    ) -> Result<Option<SensorOutput>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_outputs
             WHERE plant_id = $1
             ORDER BY recorded_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, SensorOutput>(&query)
            .bind(plant_id)
            .fetch_optional(pool)
            .await
    }

    /// Count and min/avg/max of every metric for a plant within an optional window.
    pub async fn summary_for_plant(
        pool: &PgPool,
        plant_id: DbId,
        since: Option<Timestamp>,
        until: Option<Timestamp>,
    ) -> Result<SensorSummary, sqlx::Error> {
        sqlx::query_as::<_, SensorSummary>(
            "SELECT
                COUNT(*)           AS count,
                MIN(recorded_at)   AS first_recorded_at,
                MAX(recorded_at)   AS last_recorded_at,
                MIN(temperature)   AS temperature_min,
                AVG(temperature)   AS temperature_avg,
                MAX(temperature)   AS temperature_max,
                MIN(soil_moisture) AS soil_moisture_min,
                AVG(soil_moisture) AS soil_moisture_avg,
                MAX(soil_moisture) AS soil_moisture_max,
                MIN(light_level)   AS light_level_min,
                AVG(light_level)   AS light_level_avg,
                MAX(light_level)   AS light_level_max,
                MIN(humidity)      AS humidity_min,
                AVG(humidity)      AS humidity_avg,
                MAX(humidity)      AS humidity_max
             FROM sensor_outputs
             WHERE plant_id = $1
               AND ($2::timestamptz IS NULL OR recorded_at >= $2)
               AND ($3::timestamptz IS NULL OR recorded_at <= $3)",
        )
        .bind(plant_id)
        .bind(since)
        .bind(until)
        .fetch_one(pool)
        .await
    }
}
