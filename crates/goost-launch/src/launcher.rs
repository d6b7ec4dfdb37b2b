//! Launcher entry point.
//!
//! The [`Launcher`] checks that the engine has been built, locates its
//! binary, and runs one of the three [`Tool`]s against it.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::config::{LauncherConfig, read_project_layout};
use crate::error::{FAILURE_EXIT_CODE, LauncherError};
use crate::invocation::{Invocation, TestSelection};
use crate::resolver;
use crate::runner::{ProcessRunner, RunOutcome};
use crate::timer::ElapsedTimer;

/// What to run the engine for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tool {
    /// The Godot editor on the test project.
    Editor,
    /// The GUT unit test suite.
    Tests(TestSelection),
    /// The class reference generator.
    Doc,
}

/// Flags shared by every tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    /// Let the engine open a window.
    pub windowed: bool,
    /// Pass `--verbose` to the engine.
    pub verbose: bool,
    /// Run tests with the engine's debugger (`-d`).
    pub debug: bool,
}

/// Runs engine tools against a built Goost tree.
///
/// # Examples
///
/// ```no_run
/// use goost_launch::{Launcher, LauncherConfig, RunFlags, Tool};
///
/// # async fn example() -> Result<(), goost_launch::LauncherError> {
/// let config = LauncherConfig::builder().root(".").build();
/// let launcher = Launcher::new(config)?;
/// let code = launcher.run(Tool::Editor, RunFlags::default()).await?;
/// # let _ = code;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Launcher {
    config: LauncherConfig,
    engine: PathBuf,
    runner: ProcessRunner,
}

impl Launcher {
    /// Create a launcher for the tree at `config.root()`.
    ///
    /// Loads `launcher.yaml` when present and replaces the configured layout
    /// with it. The engine checkout is checked before the build descriptor
    /// is read, so an unbuilt tree never gets as far as resolving a binary.
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::RepositoryNotFound` if the engine checkout is
    /// missing, any resolver error if the binary cannot be located, and
    /// layout errors if `launcher.yaml` is invalid.
    #[instrument(skip_all, fields(root = %config.root().display()))]
    pub fn new(config: LauncherConfig) -> Result<Self, LauncherError> {
        let layout_path = LauncherConfig::layout_path(config.root());
        let config = match read_project_layout(&layout_path)? {
            Some(layout) => {
                debug!(path = %layout_path.display(), "loaded launcher layout");
                LauncherConfig::builder()
                    .root(config.root())
                    .layout(layout)
                    .build()
            }
            None => config,
        };

        let engine_dir = config.engine_dir();
        if !engine_dir.is_dir() {
            return Err(LauncherError::RepositoryNotFound(engine_dir));
        }

        let engine = resolver::locate(&config)?;
        info!(engine = %engine.display(), "located engine binary");

        let runner = ProcessRunner::new(config.root());
        Ok(Self {
            config,
            engine,
            runner,
        })
    }

    /// Returns the launcher configuration.
    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Returns the located engine binary.
    pub fn engine(&self) -> &Path {
        &self.engine
    }

    /// Run `tool` and return the engine's exit code.
    ///
    /// A test run can be cancelled with Ctrl-C, which kills the engine and
    /// yields 255.
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::Spawn` if the engine cannot be started and
    /// `LauncherError::Io` if the doc output directory cannot be created.
    pub async fn run(&self, tool: Tool, flags: RunFlags) -> Result<i32, LauncherError> {
        self.run_with_interrupt(tool, flags, ctrl_c()).await
    }

    /// Same as [`Launcher::run`], with test runs cancelled by `interrupt`
    /// instead of Ctrl-C.
    ///
    /// # Errors
    ///
    /// Same as [`Launcher::run`].
    #[instrument(skip(self, interrupt))]
    pub async fn run_with_interrupt<F>(
        &self,
        tool: Tool,
        flags: RunFlags,
        interrupt: F,
    ) -> Result<i32, LauncherError>
    where
        F: Future<Output = ()>,
    {
        match tool {
            Tool::Editor => {
                println!("Running Godot editor ...");
                let invocation = Invocation::editor(&self.engine, &self.config, flags.verbose);
                self.runner.run(&invocation).await
            }
            Tool::Tests(selection) => {
                println!("Running Goost tests ...");
                let invocation = Invocation::tests(
                    &self.engine,
                    &self.config,
                    &selection,
                    flags.windowed,
                    flags.verbose,
                    flags.debug,
                );
                self.run_tests(&invocation, interrupt).await
            }
            Tool::Doc => {
                println!("Generating documentation ...");
                let output_dir = self.config.doc_output_dir();
                fs::create_dir_all(&output_dir)?;
                debug!(path = %output_dir.display(), "ensured doc output directory");
                let invocation =
                    Invocation::doc(&self.engine, &output_dir, flags.windowed, flags.verbose);
                self.runner.run(&invocation).await
            }
        }
    }

    async fn run_tests<F>(
        &self,
        invocation: &Invocation,
        interrupt: F,
    ) -> Result<i32, LauncherError>
    where
        F: Future<Output = ()>,
    {
        let _timer = ElapsedTimer::start();
        match self.runner.run_until(invocation, interrupt).await? {
            RunOutcome::Exited(code) => Ok(code),
            RunOutcome::Interrupted => {
                println!("Aborting Goost tests.");
                Ok(i32::from(FAILURE_EXIT_CODE))
            }
        }
    }
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
