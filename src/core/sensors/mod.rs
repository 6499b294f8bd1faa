// src/core/sensors/mod.rs

//! Battery telemetry read from cached sysfs handles

pub mod cache;
pub mod reader;
pub mod status;

pub use cache::{SYSFS_BATTERY_ROOT, SensorFile, SensorFileCache};
pub use status::{BatteryStatus, StatusLine, UNKNOWN_STATUS};
