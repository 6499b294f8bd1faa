// tests/fd_leak.rs
//
// Kept to a single test so no other thread opens descriptors meanwhile.

use battery_bridge::core::sensors::SensorFileCache;
use std::fs;
use tempfile::TempDir;

fn open_fd_count() -> usize {
    fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
fn failed_init_closes_everything_it_opened() {
    let td = TempDir::new().unwrap();
    fs::write(td.path().join("voltage_now"), "1\n").unwrap();
    fs::write(td.path().join("current_now"), "2\n").unwrap();
    fs::write(td.path().join("capacity"), "3\n").unwrap();
    // no status file: the fourth open fails

    let cache = SensorFileCache::with_root(td.path());
    let before = open_fd_count();
    for _ in 0..16 {
        assert!(cache.init().is_err());
    }
    assert_eq!(open_fd_count(), before);
    assert!(!cache.is_ready());
}
