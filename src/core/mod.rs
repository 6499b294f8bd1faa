// src/core/mod.rs

pub mod bridge;
pub mod config;
pub mod config_loader;
pub mod fileio;
pub mod logging;
pub mod probe;
pub mod sensors;
