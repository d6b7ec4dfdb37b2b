use std::path::PathBuf;

use thiserror::Error;

/// Exit status used for every launcher-side failure.
pub const FAILURE_EXIT_CODE: u8 = 255;

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("no Godot repository found at {}, aborting", .0.display())]
    RepositoryNotFound(PathBuf),

    #[error("no engine construction environment found: {}: {source}", .path.display())]
    BuildEnvUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed engine construction environment {}: {source}", .path.display())]
    BuildEnvMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no engine construction environment found")]
    EmptyExecutablePath,

    #[error("could not find engine executable at {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("invalid launcher layout: {0}")]
    InvalidLayout(String),

    #[error("layout error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LauncherError {
    /// Process exit status the launcher terminates with for this error.
    pub fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }

    /// Whether the error means the engine has not been built yet.
    pub fn needs_build(&self) -> bool {
        matches!(
            self,
            Self::RepositoryNotFound(_)
                | Self::BuildEnvUnreadable { .. }
                | Self::BuildEnvMalformed { .. }
                | Self::EmptyExecutablePath
                | Self::ExecutableNotFound(_)
        )
    }
}
