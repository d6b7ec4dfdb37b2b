mod config;
mod descriptor;
mod error;
mod invocation;
mod launcher;
mod resolver;
mod runner;
mod timer;

#[cfg(all(test, unix))]
mod testing;

pub use config::{
    LAYOUT_FILE, LauncherConfig, MIN_FIXED_FPS, ProjectLayout, load_project_layout,
    read_project_layout,
};
pub use descriptor::BuildEnv;
pub use error::{FAILURE_EXIT_CODE, LauncherError};
pub use invocation::{Invocation, NO_WINDOW_FLAG, TestSelection, VERBOSE_FLAG, resource_path};
pub use launcher::{Launcher, RunFlags, Tool};
pub use runner::RunOutcome;
pub use timer::{ElapsedTimer, format_elapsed};
