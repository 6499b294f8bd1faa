// src/core/probe.rs

use crate::core::config::ProbeConfig;
use crate::core::fileio::{OpenMode, RawHandle, write_slice};
use crate::core::sensors::{SensorFileCache, StatusLine, UNKNOWN_STATUS};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusFormat {
    // Trimmed text, "Unknown" when unavailable
    #[default]
    Text,
    // First byte as a number, 0 when unavailable
    Code,
}

// One reading of every sensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub voltage_uv: i64,
    pub current_ua: i64,
    pub capacity: i32,
    pub status: Option<StatusLine>,
}

impl Snapshot {
    pub fn capture(cache: &SensorFileCache) -> Self {
        Snapshot {
            voltage_uv: cache.voltage(),
            current_ua: cache.current(),
            capacity: cache.capacity(),
            status: cache.status_line(),
        }
    }

    pub fn status_field(&self, format: StatusFormat) -> String {
        match (format, &self.status) {
            (StatusFormat::Text, Some(line)) => line.text(),
            (StatusFormat::Text, None) => UNKNOWN_STATUS.to_string(),
            (StatusFormat::Code, Some(line)) => line.char_code().to_string(),
            (StatusFormat::Code, None) => "0".to_string(),
        }
    }

    pub fn format_line(&self, format: StatusFormat) -> String {
        format!(
            "voltage_uv={} current_ua={} capacity={} status={}",
            self.voltage_uv,
            self.current_ua,
            self.capacity,
            self.status_field(format)
        )
    }
}

/// Write all of `bytes`, looping over short writes.
///
/// A writer that accepts nothing is treated as an error instead of
/// spinning forever.
pub fn write_fully<W>(writer: &mut W, bytes: &[u8]) -> Result<()>
where
    W: Write + ?Sized,
{
    let mut offset = 0;
    while offset < bytes.len() {
        let n = write_slice(writer, bytes, offset, bytes.len() - offset)?;
        if n == 0 {
            anyhow::bail!("Writer accepted 0 of {} remaining bytes", bytes.len() - offset);
        }
        offset += n;
    }
    Ok(())
}

// Reads snapshots from an initialised cache, printing and optionally appending them
pub struct Probe<'a> {
    cache: &'a SensorFileCache,
    cfg: ProbeConfig,
}

impl<'a> Probe<'a> {
    pub fn new(cache: &'a SensorFileCache, cfg: ProbeConfig) -> Self {
        Probe { cache, cfg }
    }

    /// Take `samples` snapshots, writing each line to `out`.
    ///
    /// With an output path configured, every line is also appended to that
    /// file, which is synced and closed once all samples are taken.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Vec<Snapshot>> {
        let mut sink = match &self.cfg.output {
            Some(path) => Some(RawHandle::open(path, OpenMode::Append)?),
            None => None,
        };

        let mut taken = Vec::with_capacity(self.cfg.samples as usize);
        for i in 0..self.cfg.samples {
            if i > 0 {
                thread::sleep(Duration::from_millis(self.cfg.interval_ms));
            }

            let snap = Snapshot::capture(self.cache);
            let mut line = snap.format_line(self.cfg.status_format);
            info!(sample = i + 1, %line, "Battery snapshot");
            line.push('\n');

            out.write_all(line.as_bytes())
                .context("Writing snapshot to output stream")?;
            if let Some(handle) = sink.as_mut() {
                write_fully(&mut RawWriter(handle), line.as_bytes())?;
            }
            taken.push(snap);
        }

        if let Some(handle) = sink.take() {
            handle.sync()?;
            handle.close()?;
        }
        Ok(taken)
    }
}

// Lets `write_fully` drive a `RawHandle`
struct RawWriter<'a>(&'a mut RawHandle);

impl Write for RawWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .write(buf, 0, buf.len())
            .map_err(std::io::Error::other)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
