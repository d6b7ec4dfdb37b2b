//! Configuration types for goost-launch.
//!
//! This module defines [`LauncherConfig`] (CLI-level settings) and
//! [`ProjectLayout`] (from an optional `launcher.yaml` at the repository
//! root). Every path the launcher touches is derived from the two.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::LauncherError;

/// Name of the optional layout file at the repository root.
pub const LAYOUT_FILE: &str = "launcher.yaml";

/// File written by the engine's scons build describing the build environment.
const BUILD_ENV_FILE: &str = ".scons_env.json";

/// Lowest frame rate the engine tolerates before delta time errors show up.
pub const MIN_FIXED_FPS: u32 = 15;

// ── Launcher Configuration (CLI-level) ───────────────────────

/// Launcher configuration provided by the CLI layer.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use goost_launch::LauncherConfig;
///
/// let config = LauncherConfig::builder()
///     .root(PathBuf::from("/src/goost"))
///     .build();
///
/// assert_eq!(config.engine_dir(), PathBuf::from("/src/goost/godot"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct LauncherConfig {
    /// Path to the Goost repository root.
    #[builder(setter(into))]
    root: PathBuf,

    /// Layout of the engine checkout and test project.
    #[builder(default)]
    #[serde(default)]
    layout: ProjectLayout,
}

impl LauncherConfig {
    /// Returns the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the project layout.
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Returns the engine checkout directory. Its presence marks a finished
    /// `scons` run.
    pub fn engine_dir(&self) -> PathBuf {
        self.root.join(&self.layout.engine_dir)
    }

    /// Returns the path to the build environment descriptor.
    pub fn build_env_path(&self) -> PathBuf {
        self.engine_dir().join(BUILD_ENV_FILE)
    }

    /// Returns the directory holding compiled engine binaries.
    pub fn bin_dir(&self) -> PathBuf {
        self.engine_dir().join("bin")
    }

    /// Returns the test project path, relative to the root.
    pub fn project_path(&self) -> &Path {
        &self.layout.project
    }

    /// Returns the absolute path to the GUT command-line script.
    pub fn gut_script(&self) -> PathBuf {
        self.root.join(&self.layout.gut_script)
    }

    /// Returns the documentation output directory.
    pub fn doc_output_dir(&self) -> PathBuf {
        self.root.join(&self.layout.doc_output)
    }

    /// Returns the path to `launcher.yaml` for a repository root.
    pub fn layout_path(root: &Path) -> PathBuf {
        root.join(LAYOUT_FILE)
    }
}

// ── Project Layout (launcher.yaml) ───────────────────────────

/// Repository layout, deserialized from `launcher.yaml`.
///
/// All fields have serde defaults matching the stock Goost checkout, so
/// the file is only needed when a tree deviates from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLayout {
    /// Engine checkout directory, relative to the root.
    #[serde(default = "default_engine_dir")]
    pub engine_dir: PathBuf,

    /// Test project directory, relative to the root.
    #[serde(default = "default_project")]
    pub project: PathBuf,

    /// GUT command-line script, relative to the root.
    #[serde(default = "default_gut_script")]
    pub gut_script: PathBuf,

    /// Documentation output directory, relative to the root.
    #[serde(default = "default_doc_output")]
    pub doc_output: PathBuf,

    /// Resource path prefix test files are mounted under.
    #[serde(default = "default_resource_prefix")]
    pub resource_prefix: String,

    /// Fixed frame rate tests run at.
    #[serde(default = "default_fixed_fps")]
    pub fixed_fps: u32,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            engine_dir: default_engine_dir(),
            project: default_project(),
            gut_script: default_gut_script(),
            doc_output: default_doc_output(),
            resource_prefix: default_resource_prefix(),
            fixed_fps: default_fixed_fps(),
        }
    }
}

impl ProjectLayout {
    fn validate(&self) -> Result<(), LauncherError> {
        if self.fixed_fps < MIN_FIXED_FPS {
            return Err(LauncherError::InvalidLayout(format!(
                "fixedFps must be at least {MIN_FIXED_FPS}, got {}",
                self.fixed_fps
            )));
        }
        if self.engine_dir.as_os_str().is_empty() {
            return Err(LauncherError::InvalidLayout(
                "engineDir must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

// ── Default value functions for serde ────────────────────────

fn default_engine_dir() -> PathBuf {
    PathBuf::from("godot")
}

fn default_project() -> PathBuf {
    PathBuf::from("tests/project")
}

fn default_gut_script() -> PathBuf {
    PathBuf::from("tests/project/addons/gut/gut_cmdln.gd")
}

fn default_doc_output() -> PathBuf {
    PathBuf::from("doc/godot")
}

fn default_resource_prefix() -> String {
    "res://goost/".to_owned()
}

fn default_fixed_fps() -> u32 {
    MIN_FIXED_FPS
}

// ── Layout loading ───────────────────────────────────────────

/// Load [`ProjectLayout`] from a `launcher.yaml` file.
///
/// If the file does not exist, returns the default layout.
///
/// # Errors
///
/// Same as [`read_project_layout`].
pub fn load_project_layout(path: &Path) -> Result<ProjectLayout, LauncherError> {
    Ok(read_project_layout(path)?.unwrap_or_default())
}

/// Read [`ProjectLayout`] from a `launcher.yaml` file, or `None` if the file
/// does not exist.
///
/// # Errors
///
/// Returns `LauncherError::Io` if the file exists but cannot be read.
/// Returns `LauncherError::Yaml` if the file contains invalid YAML.
/// Returns `LauncherError::InvalidLayout` if a value is out of range.
pub fn read_project_layout(path: &Path) -> Result<Option<ProjectLayout>, LauncherError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    // An empty file parses as YAML null; treat it as all defaults.
    if content.trim().is_empty() {
        return Ok(Some(ProjectLayout::default()));
    }
    let layout: ProjectLayout = serde_yaml::from_str(&content)?;
    layout.validate()?;
    Ok(Some(layout))
}
