//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO for the fields an update may touch

pub mod device;
pub mod plant;
pub mod sensor_output;
pub mod user;
