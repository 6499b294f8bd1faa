// src/core/bridge/mod.rs

//! Boundary surfaces with sentinel return values.
//!
//! `power_reader` and `power_util` are two names for the same global
//! sensor cache; they differ only in how the status is handed back.

pub mod data_writer;
pub mod power_reader;
pub mod power_util;
