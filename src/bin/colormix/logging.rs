//! Log setup. The terminal is owned by the UI, so logs go to a file.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber. `RUST_LOG` picks the filter, `info` by
/// default.
pub fn init_tracing(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .wrap_err("tracing has already been initialised")?;
    Ok(())
}
