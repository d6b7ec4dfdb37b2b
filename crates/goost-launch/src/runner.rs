//! Engine process execution (internal).
//!
//! Spawns the engine with inherited stdio and blocks until it exits. The
//! engine's exit code is passed through untouched; the launcher never
//! interprets it.

use std::future::Future;
use std::path::PathBuf;
use std::pin::pin;
use std::process::ExitStatus;

use futures::FutureExt;
use tokio::process::{Child, Command};
use tracing::{debug, instrument, warn};

use crate::error::{FAILURE_EXIT_CODE, LauncherError};
use crate::invocation::Invocation;

/// How a run under [`ProcessRunner::run_until`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The engine exited on its own with this code.
    Exited(i32),
    /// The interrupt fired first; the engine was killed.
    Interrupted,
}

/// Runs engine invocations from a fixed working directory.
#[derive(Debug)]
pub(crate) struct ProcessRunner {
    /// Working directory of the child, the Goost root.
    cwd: PathBuf,
}

impl ProcessRunner {
    pub(crate) fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Run the invocation to completion and return its exit code.
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::Spawn` if the engine cannot be started and
    /// `LauncherError::Io` if waiting on it fails.
    #[instrument(skip_all, fields(program = %invocation.program().display()))]
    pub(crate) async fn run(&self, invocation: &Invocation) -> Result<i32, LauncherError> {
        let mut child = self.spawn(invocation)?;
        let status = child.wait().await?;
        Ok(exit_code(status))
    }

    /// Run the invocation until it exits or `interrupt` completes.
    ///
    /// On interrupt the child is killed and reaped before returning. An
    /// interrupt that is ready by the time the child exits still counts.
    ///
    /// # Errors
    ///
    /// Same as [`ProcessRunner::run`].
    #[instrument(skip_all, fields(program = %invocation.program().display()))]
    pub(crate) async fn run_until<F>(
        &self,
        invocation: &Invocation,
        interrupt: F,
    ) -> Result<RunOutcome, LauncherError>
    where
        F: Future<Output = ()>,
    {
        let mut child = self.spawn(invocation)?;
        let mut interrupt = pin!(interrupt);

        // Ctrl-C reaches the engine too, so both may be ready at once.
        let finished = tokio::select! {
            biased;
            () = &mut interrupt => None,
            status = child.wait() => Some(status),
        };

        match finished {
            Some(status) if interrupt.as_mut().now_or_never().is_none() => {
                Ok(RunOutcome::Exited(exit_code(status?)))
            }
            Some(_) => {
                debug!("interrupted as the engine exited");
                Ok(RunOutcome::Interrupted)
            }
            None => {
                debug!("interrupted, killing engine");
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "failed to kill engine process");
                }
                Ok(RunOutcome::Interrupted)
            }
        }
    }

    fn spawn(&self, invocation: &Invocation) -> Result<Child, LauncherError> {
        let argv = invocation.argv();
        debug!(?argv, cwd = %self.cwd.display(), "spawning engine");

        Command::new(invocation.program())
            .args(&argv[1..])
            .current_dir(&self.cwd)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LauncherError::Spawn {
                program: invocation.program().to_path_buf(),
                source,
            })
    }
}

/// Exit code of a finished child; signal deaths have none and map to 255.
fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => {
            warn!(%status, "engine terminated without an exit code");
            i32::from(FAILURE_EXIT_CODE)
        }
    }
}
