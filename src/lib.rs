// src/lib.rs
//! Raw file descriptor I/O and cached battery telemetry for a host application.

pub mod core;
