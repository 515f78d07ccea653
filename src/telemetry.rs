use crate::error::{Error, Result};
use std::env;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

/// Default when neither `BT_DUALBOOT_LOG` nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "warn";

/// Log filter from `BT_DUALBOOT_LOG`, then `RUST_LOG`
pub fn log_filter() -> String {
    env::var("BT_DUALBOOT_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string())
}

/// Install a stderr `tracing` subscriber. Stdout is left for the record.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_new(log_filter()).map_err(|e| Error::Telemetry(e.to_string()))?;
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Telemetry(e.to_string()))
}
