// src/core/logging.rs

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

// Filter used until the configured level is known
pub const DEFAULT_LEVEL: &str = "info";

/// Handle onto the installed filter.
///
/// Logging has to be up before the config is read, so the subscriber
/// starts at `RUST_LOG` (or `DEFAULT_LEVEL`) and the configured level is
/// swapped in afterwards. An explicit `RUST_LOG` always wins.
pub struct LogLevel {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogLevel {
    pub fn apply(&self, level: &str) -> Result<()> {
        if self.from_env {
            return Ok(());
        }
        let filter =
            EnvFilter::try_new(level).with_context(|| format!("Invalid log level {level:?}"))?;
        self.handle
            .reload(filter)
            .context("Replacing tracing filter")
    }
}

// Install the global subscriber, writing to stderr so stdout only carries snapshot lines
pub fn init() -> Result<LogLevel> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_LEVEL), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Installing tracing subscriber")?;

    Ok(LogLevel { handle, from_env })
}
