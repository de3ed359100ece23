//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod device_repo;
pub mod plant_repo;
pub mod sensor_output_repo;
pub mod user_repo;

pub use device_repo::DeviceRepo;
pub use plant_repo::PlantRepo;
pub use sensor_output_repo::SensorOutputRepo;
pub use user_repo::UserRepo;
