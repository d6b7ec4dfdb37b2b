//! Logging initialization.
//!
//! Diagnostics go to stderr through `tracing`, filtered by `RUST_LOG`.
//! User-facing output (banners, errors, elapsed time) is printed directly
//! and never depends on the filter.

use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Initialize the global tracing subscriber writing to stderr.
///
/// An invalid `RUST_LOG` falls back to [`DEFAULT_DIRECTIVE`] with a warning
/// instead of keeping the launcher from running.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, invalid) = select_filter(spec.as_deref());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    if let Some(e) = invalid {
        warn!("{e:#}, falling back to `{DEFAULT_DIRECTIVE}`");
    }
    Ok(())
}

/// Pick the filter for `spec`, returning the parse error alongside the
/// default filter when `spec` is invalid.
fn select_filter(spec: Option<&str>) -> (EnvFilter, Option<anyhow::Error>) {
    match build_filter(spec) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_DIRECTIVE), Some(e)),
    }
}

/// Build the filter from a `RUST_LOG`-style spec, falling back to
/// [`DEFAULT_DIRECTIVE`].
fn build_filter(spec: Option<&str>) -> Result<EnvFilter> {
    let spec = spec
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE);
    EnvFilter::try_new(spec).with_context(|| format!("invalid log filter: {spec}"))
}
