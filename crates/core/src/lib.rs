//! Domain types, validation rules, and the error taxonomy shared by every
//! plant-monitoring crate. No I/O lives here.

pub mod device;
pub mod error;
pub mod pagination;
pub mod plant;
pub mod plant_image;
pub mod roles;
pub mod sensor;
pub mod serde_ext;
pub mod types;
