// src/core/bridge/power_util.rs

//! Telemetry entry points used by the server; status as trimmed text.

use crate::core::sensors::SensorFileCache;

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

pub fn get_status() -> String {
    status_in(SensorFileCache::global())
}

fn init_in(cache: &SensorFileCache) -> i32 {
    i32::from(cache.init().is_ok())
}

fn status_in(cache: &SensorFileCache) -> String {
    cache.status_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn battery_dir(status: &str) -> TempDir {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("voltage_now"), "3800000\n").unwrap();
        fs::write(td.path().join("current_now"), "200000\n").unwrap();
        fs::write(td.path().join("capacity"), "42").unwrap();
        fs::write(td.path().join("status"), status).unwrap();
        td
    }

    #[test]
    fn ready_cache_reports_trimmed_text() {
        let td = battery_dir("Charging \n");
        let cache = SensorFileCache::with_root(td.path());

        assert_eq!(init_in(&cache), 1);
        assert_eq!(status_in(&cache), "Charging");
        assert_eq!(cache.current(), 200_000);
        assert_eq!(cache.capacity(), 42);
    }

    #[test]
    fn empty_status_is_unknown() {
        let td = battery_dir("");
        let cache = SensorFileCache::with_root(td.path());

        assert_eq!(init_in(&cache), 1);
        assert_eq!(status_in(&cache), "Unknown");
    }

    #[test]
    fn failed_init_is_unknown() {
        let td = battery_dir("Discharging\n");
        fs::remove_file(td.path().join("status")).unwrap();
        let cache = SensorFileCache::with_root(td.path());

        assert_eq!(init_in(&cache), 0);
        assert_eq!(status_in(&cache), "Unknown");
    }
}
