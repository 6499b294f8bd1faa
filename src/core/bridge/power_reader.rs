// src/core/bridge/power_reader.rs

//! Telemetry entry points used by the recorder; status as a character code.

use crate::core::sensors::SensorFileCache;

// `1` once the sensor files are open, `0` otherwise
pub fn init() -> i32 {
    init_in(SensorFileCache::global())
}

pub fn get_voltage() -> i64 {
    SensorFileCache::global().voltage()
}

pub fn get_current() -> i64 {
    SensorFileCache::global().current()
}

pub fn get_capacity() -> i32 {
    SensorFileCache::global().capacity()
}

// First byte of the status file, e.g. `'C'` for "Charging"
pub fn get_status() -> i32 {
    status_in(SensorFileCache::global())
}

fn init_in(cache: &SensorFileCache) -> i32 {
    i32::from(cache.init().is_ok())
}

fn status_in(cache: &SensorFileCache) -> i32 {
    cache.status_code()
}
