//! Build environment descriptor written by the engine's scons build.

use std::path::Path;

use serde::Deserialize;

use crate::error::LauncherError;

/// Platform name of the headless server build.
const SERVER_PLATFORM: &str = "server";

/// Subset of `.scons_env.json` the launcher needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildEnv {
    /// Target platform the engine was built for.
    pub platform: String,

    /// Platform-specific executable suffix, e.g. `.x11.tools.64`.
    #[serde(rename = "PROGSUFFIX")]
    pub prog_suffix: String,
}

impl BuildEnv {
    /// Read and parse the descriptor at `path`.
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::BuildEnvUnreadable` if the file cannot be read.
    /// Returns `LauncherError::BuildEnvMalformed` if it is not valid JSON or
    /// lacks `platform` or `PROGSUFFIX`.
    pub fn load(path: &Path) -> Result<Self, LauncherError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| LauncherError::BuildEnvUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| LauncherError::BuildEnvMalformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File name of the engine binary produced by this build.
    pub fn binary_name(&self) -> String {
        if self.platform == SERVER_PLATFORM {
            format!("godot_server{}", self.prog_suffix)
        } else {
            format!("godot{}", self.prog_suffix)
        }
    }
}
