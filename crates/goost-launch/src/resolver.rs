//! Engine executable resolution (internal).

use std::path::PathBuf;

use tracing::{debug, instrument, warn};

use crate::config::LauncherConfig;
use crate::descriptor::BuildEnv;
use crate::error::LauncherError;

/// Compute the engine binary path from the build environment descriptor.
///
/// # Errors
///
/// Returns `LauncherError::BuildEnvUnreadable` or
/// `LauncherError::BuildEnvMalformed` if the descriptor cannot be used, and
/// `LauncherError::EmptyExecutablePath` if it yields no binary name.
#[instrument(skip(config))]
pub(crate) fn resolve(config: &LauncherConfig) -> Result<PathBuf, LauncherError> {
    let env_path = config.build_env_path();
    let env = BuildEnv::load(&env_path).inspect_err(|e| {
        warn!(path = %env_path.display(), error = %e, "failed to load build environment");
    })?;

    let name = env.binary_name();
    if name.is_empty() {
        return Err(LauncherError::EmptyExecutablePath);
    }

    let binary = config.bin_dir().join(name);
    debug!(platform = %env.platform, binary = %binary.display(), "resolved engine binary");
    Ok(binary)
}

/// Resolve the engine binary and check that it was actually built.
///
/// # Errors
///
/// Returns any error from [`resolve`], or `LauncherError::ExecutableNotFound`
/// if the resolved file does not exist.
pub(crate) fn locate(config: &LauncherConfig) -> Result<PathBuf, LauncherError> {
    let binary = resolve(config)?;
    if !binary.is_file() {
        return Err(LauncherError::ExecutableNotFound(binary));
    }
    Ok(binary)
}
