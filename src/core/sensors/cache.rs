// src/core/sensors/cache.rs

use once_cell::sync::{Lazy, OnceCell};

use super::reader::{narrow_to_int, parse_leading_int, read_first_line};
use super::status::{BatteryStatus, StatusLine, UNKNOWN_STATUS};
use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, error, info, warn};

// Fixed location of the battery power_supply node
pub const SYSFS_BATTERY_ROOT: &str = "/sys/class/power_supply/battery";

static GLOBAL: Lazy<SensorFileCache> = Lazy::new(SensorFileCache::sysfs);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFile {
    Voltage,
    Current,
    Capacity,
    Status,
}

impl SensorFile {
    // Opening order used by `SensorFileCache::init`
    pub const ALL: [SensorFile; 4] = [
        SensorFile::Voltage,
        SensorFile::Current,
        SensorFile::Capacity,
        SensorFile::Status,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SensorFile::Voltage => "voltage_now",
            SensorFile::Current => "current_now",
            SensorFile::Capacity => "capacity",
            SensorFile::Status => "status",
        }
    }
}

// All four handles, or none of them
struct CachedHandles {
    voltage: Mutex<File>,
    current: Mutex<File>,
    capacity: Mutex<File>,
    status: Mutex<File>,
}

impl CachedHandles {
    // An early return drops (and so closes) whatever was already opened
    fn open(root: &Path) -> Result<Self> {
        let voltage = open_sensor(root, SensorFile::Voltage)?;
        let current = open_sensor(root, SensorFile::Current)?;
        let capacity = open_sensor(root, SensorFile::Capacity)?;
        let status = open_sensor(root, SensorFile::Status)?;
        Ok(CachedHandles {
            voltage,
            current,
            capacity,
            status,
        })
    }

    fn get(&self, which: SensorFile) -> &Mutex<File> {
        match which {
            SensorFile::Voltage => &self.voltage,
            SensorFile::Current => &self.current,
            SensorFile::Capacity => &self.capacity,
            SensorFile::Status => &self.status,
        }
    }
}

fn open_sensor(root: &Path, which: SensorFile) -> Result<Mutex<File>> {
    let path = root.join(which.file_name());
    let file = File::open(&path).with_context(|| format!("Opening {}", path.display()))?;
    Ok(Mutex::new(file))
}

/// Process-lifetime cache of the battery telemetry pseudo-files.
///
/// The files are opened once by [`SensorFileCache::init`] and re-read on
/// every accessor call. Until `init` has succeeded every accessor returns
/// its neutral default (`0`, or `"Unknown"` for the status text), and read
/// or parse misses on an open handle degrade the same way.
pub struct SensorFileCache {
    root: PathBuf,
    handles: OnceCell<CachedHandles>,
}

impl SensorFileCache {
    pub fn sysfs() -> Self {
        Self::with_root(SYSFS_BATTERY_ROOT)
    }

    // Point the cache at another directory laid out like the sysfs node
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        SensorFileCache {
            root: root.into(),
            handles: OnceCell::new(),
        }
    }

    // The instance shared by every bridge surface
    pub fn global() -> &'static SensorFileCache {
        &GLOBAL
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Open all four sensor files, once.
    ///
    /// Returns immediately once the cache is ready. Concurrent first calls
    /// are serialised, so the files are never opened twice. On failure
    /// nothing stays open and the cache remains uninitialised.
    pub fn init(&self) -> Result<()> {
        self.handles
            .get_or_try_init(|| {
                let handles = CachedHandles::open(&self.root)?;
                info!(root = ?self.root, "Battery sensor files opened");
                Ok::<_, anyhow::Error>(handles)
            })
            .map(|_| ())
            .inspect_err(|e| error!(root = ?self.root, "Battery sensor setup failed: {e:#}"))
    }

    pub fn is_ready(&self) -> bool {
        self.handles.get().is_some()
    }

    // Microvolts
    pub fn voltage(&self) -> i64 {
        self.read_long(SensorFile::Voltage)
    }

    // Microamps; the sign convention is the driver's
    pub fn current(&self) -> i64 {
        self.read_long(SensorFile::Current)
    }

    // Percent
    pub fn capacity(&self) -> i32 {
        narrow_to_int(self.read_long(SensorFile::Capacity))
    }

    pub fn status_line(&self) -> Option<StatusLine> {
        self.read_line(SensorFile::Status).map(StatusLine::from_raw)
    }

    pub fn status(&self) -> BatteryStatus {
        self.status_line()
            .map_or(BatteryStatus::Unknown, |line| line.status())
    }

    // First byte of the status file, 0 when unavailable
    pub fn status_code(&self) -> i32 {
        self.status_line().map_or(0, |line| line.char_code())
    }

    // Trimmed status text, "Unknown" when unavailable
    pub fn status_text(&self) -> String {
        self.status_line()
            .map_or_else(|| UNKNOWN_STATUS.to_string(), |line| line.text())
    }

    fn read_long(&self, which: SensorFile) -> i64 {
        self.read_line(which)
            .map_or(0, |line| parse_leading_int(&line))
    }

    fn read_line(&self, which: SensorFile) -> Option<Vec<u8>> {
        let handles = self.handles.get()?;
        let mut file = match handles.get(which).lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!(sensor = which.file_name(), "Sensor handle lock poisoned");
                return None;
            }
        };
        match read_first_line(&mut *file) {
            Ok(line) => line,
            Err(e) => {
                debug!(sensor = which.file_name(), "Sensor read failed: {e:#}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn battery_dir(voltage: &str, current: &str, capacity: &str, status: &str) -> TempDir {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("voltage_now"), voltage).unwrap();
        fs::write(td.path().join("current_now"), current).unwrap();
        fs::write(td.path().join("capacity"), capacity).unwrap();
        fs::write(td.path().join("status"), status).unwrap();
        td
    }

    #[test]
    fn reads_all_values() {
        let td = battery_dir("4123000\n", "-350000\n", "87", "Charging \n");
        let cache = SensorFileCache::with_root(td.path());
        cache.init().unwrap();

        assert_eq!(cache.voltage(), 4_123_000);
        assert_eq!(cache.current(), -350_000);
        assert_eq!(cache.capacity(), 87);
        assert_eq!(cache.status_text(), "Charging");
        assert_eq!(cache.status_code(), i32::from(b'C'));
        assert_eq!(cache.status(), BatteryStatus::Charging);
    }

    #[test]
    fn defaults_before_init() {
        let td = battery_dir("4123000\n", "1\n", "87\n", "Full\n");
        let cache = SensorFileCache::with_root(td.path());

        assert!(!cache.is_ready());
        assert_eq!(cache.voltage(), 0);
        assert_eq!(cache.current(), 0);
        assert_eq!(cache.capacity(), 0);
        assert_eq!(cache.status_code(), 0);
        assert_eq!(cache.status_text(), UNKNOWN_STATUS);
        assert_eq!(cache.status(), BatteryStatus::Unknown);
    }

    #[test]
    fn each_missing_file_fails_init() {
        for missing in SensorFile::ALL {
            let td = battery_dir("1\n", "2\n", "3\n", "Full\n");
            fs::remove_file(td.path().join(missing.file_name())).unwrap();

            let cache = SensorFileCache::with_root(td.path());
            let err = cache.init().unwrap_err();
            assert!(format!("{err:#}").contains(missing.file_name()));
            assert!(!cache.is_ready());
            assert_eq!(cache.voltage(), 0);
            assert_eq!(cache.status_text(), UNKNOWN_STATUS);
        }
    }

    #[test]
    fn init_can_succeed_after_a_failed_attempt() {
        let td = battery_dir("1\n", "2\n", "3\n", "Full\n");
        fs::remove_file(td.path().join("status")).unwrap();
        let cache = SensorFileCache::with_root(td.path());
        assert!(cache.init().is_err());

        fs::write(td.path().join("status"), "Full\n").unwrap();
        cache.init().unwrap();
        assert_eq!(cache.status(), BatteryStatus::Full);
    }

    #[test]
    fn empty_and_garbage_files_read_as_defaults() {
        let td = battery_dir("", "n/a\n", "\n", "");
        let cache = SensorFileCache::with_root(td.path());
        cache.init().unwrap();

        assert_eq!(cache.voltage(), 0);
        assert_eq!(cache.current(), 0);
        assert_eq!(cache.capacity(), 0);
        assert_eq!(cache.status_code(), 0);
        assert_eq!(cache.status_text(), UNKNOWN_STATUS);
    }
}
