//! Integration tests for plant and sensor-output persistence.
//!
//! Exercises the repository layer against a real database:
//! - Plant create / update / delete
//! - Cascade of readings and release of devices on plant delete
//! - Reading window filters, ordering, and summaries

use plantmon_db::models::device::CreateDevice;
use plantmon_db::models::plant::PlantInput;
use plantmon_db::models::sensor_output::{CreateSensorOutput, SensorOutputFilter, SensorValues};
use plantmon_db::repositories::{DeviceRepo, PlantRepo, SensorOutputRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_plant(name: &str) -> PlantInput {
    PlantInput {
        name: name.to_string(),
        plant_type: "Herb".to_string(),
        location: "Windowsill".to_string(),
        description: "Test plant".to_string(),
    }
}

fn reading(plant_id: i64, temperature: f64) -> CreateSensorOutput {
    CreateSensorOutput {
        plant_id,
        device_id: None,
        values: SensorValues {
            temperature,
            soil_moisture: 40.0,
            light_level: 1200.0,
            humidity: 55.0,
        },
    }
}

fn all(limit: i64) -> SensorOutputFilter {
    SensorOutputFilter {
        limit,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Plants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_plant(pool: PgPool) {
    let plant = PlantRepo::create(&pool, &new_plant("Basil")).await.unwrap();
    assert_eq!(plant.name, "Basil");
    assert!(plant.image_url.is_none());

    let found = PlantRepo::find_by_id(&pool, plant.id).await.unwrap().unwrap();
    assert_eq!(found.plant_type, "Herb");
    assert!(PlantRepo::exists(&pool, plant.id).await.unwrap());
    assert!(!PlantRepo::exists(&pool, plant.id + 1000).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_keeps_image(pool: PgPool) {
    let plant = PlantRepo::create(&pool, &new_plant("Mint")).await.unwrap();
    PlantRepo::set_image(&pool, plant.id, "http://img/mint.png", "plants/1/mint.png")
        .await
        .unwrap();

    let mut input = new_plant("Peppermint");
    input.location = "Balcony".to_string();
    let updated = PlantRepo::update(&pool, plant.id, &input).await.unwrap().unwrap();

    assert_eq!(updated.name, "Peppermint");
    assert_eq!(updated.location, "Balcony");
    assert_eq!(updated.image_url.as_deref(), Some("http://img/mint.png"));
    assert_eq!(updated.image_key.as_deref(), Some("plants/1/mint.png"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_plant_returns_none(pool: PgPool) {
    let result = PlantRepo::update(&pool, 999_999, &new_plant("Ghost")).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_cascades_readings_and_frees_device(pool: PgPool) {
    let plant = PlantRepo::create(&pool, &new_plant("Rose")).await.unwrap();
    SensorOutputRepo::create(&pool, &reading(plant.id, 20.0)).await.unwrap();
    DeviceRepo::create(
        &pool,
        &CreateDevice {
            id: "probe-1".to_string(),
            device_name: "Probe".to_string(),
            plant_id: Some(plant.id),
        },
    )
    .await
    .unwrap();

    let deleted = PlantRepo::delete(&pool, plant.id).await.unwrap();
    assert!(deleted.is_some());

    let (remaining,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sensor_outputs WHERE plant_id = $1")
            .bind(plant.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(remaining, 0, "readings must cascade with the plant");

    let device = DeviceRepo::find_by_id(&pool, "probe-1").await.unwrap().unwrap();
    assert!(device.plant_id.is_none(), "device must become available");

    assert!(PlantRepo::delete(&pool, plant.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Sensor outputs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_readings_newest_first_and_paged(pool: PgPool) {
    let plant = PlantRepo::create(&pool, &new_plant("Cactus")).await.unwrap();
    for t in [10.0, 20.0, 30.0] {
        SensorOutputRepo::create(&pool, &reading(plant.id, t)).await.unwrap();
    }

    let readings = SensorOutputRepo::list_by_plant(&pool, plant.id, &all(100))
        .await
        .unwrap();
    let temps: Vec<f64> = readings.iter().map(|r| r.temperature).collect();
    assert_eq!(temps, vec![30.0, 20.0, 10.0]);

    let page = SensorOutputRepo::list_by_plant(
        &pool,
        plant.id,
        &SensorOutputFilter {
            limit: 1,
            offset: 1,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].temperature, 20.0);

    let latest = SensorOutputRepo::latest_for_plant(&pool, plant.id).await.unwrap().unwrap();
    assert_eq!(latest.temperature, 30.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_readings_window_filter(pool: PgPool) {
    let plant = PlantRepo::create(&pool, &new_plant("Orchid")).await.unwrap();
    let old = SensorOutputRepo::create(&pool, &reading(plant.id, 15.0)).await.unwrap();
    sqlx::query("UPDATE sensor_outputs SET recorded_at = NOW() - INTERVAL '2 days' WHERE id = $1")
        .bind(old.id)
        .execute(&pool)
        .await
        .unwrap();
    SensorOutputRepo::create(&pool, &reading(plant.id, 25.0)).await.unwrap();

    let filter = SensorOutputFilter {
        since: Some(chrono::Utc::now() - chrono::Duration::days(1)),
        limit: 100,
        ..Default::default()
    };
    let recent = SensorOutputRepo::list_by_plant(&pool, plant.id, &filter).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].temperature, 25.0);

    let filter = SensorOutputFilter {
        until: Some(chrono::Utc::now() - chrono::Duration::days(1)),
        limit: 100,
        ..Default::default()
    };
    let older = SensorOutputRepo::list_by_plant(&pool, plant.id, &filter).await.unwrap();
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].temperature, 15.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_summary_aggregates(pool: PgPool) {
    let plant = PlantRepo::create(&pool, &new_plant("Ivy")).await.unwrap();

    let empty = SensorOutputRepo::summary_for_plant(&pool, plant.id, None, None)
        .await
        .unwrap();
    assert_eq!(empty.count, 0);
    assert!(empty.temperature_avg.is_none());

    for t in [10.0, 20.0, 30.0] {
        SensorOutputRepo::create(&pool, &reading(plant.id, t)).await.unwrap();
    }

    let summary = SensorOutputRepo::summary_for_plant(&pool, plant.id, None, None)
        .await
        .unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.temperature_min, Some(10.0));
    assert_eq!(summary.temperature_max, Some(30.0));
    assert_eq!(summary.temperature_avg, Some(20.0));
    assert_eq!(summary.humidity_avg, Some(55.0));
}
