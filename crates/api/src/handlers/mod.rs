pub mod admin;
pub mod auth;
pub mod device;
pub mod plant;
pub mod sensor_output;
