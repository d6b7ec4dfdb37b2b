//! Engine command lines for each launcher tool.
//!
//! An [`Invocation`] is built fresh per run and owns the full argument
//! vector handed to the engine. Display and verbosity flags are applied
//! last by [`Invocation::argv`], so builders only describe the tool itself.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::LauncherConfig;

/// Engine flag disabling the main window.
pub const NO_WINDOW_FLAG: &str = "--no-window";

/// Engine flag enabling verbose output.
pub const VERBOSE_FLAG: &str = "--verbose";

/// Tests to run, as selected on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSelection {
    /// Test script relative to the Goost root, e.g. `core/math/test_random.gd`.
    pub test_file: Option<String>,
    /// Test case name; every case matching it runs.
    pub test_case: Option<String>,
}

/// A single engine command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    windowed: bool,
    verbose: bool,
}

impl Invocation {
    /// Create an invocation of `program` with tool arguments `args`.
    pub fn new(
        program: impl Into<PathBuf>,
        args: Vec<OsString>,
        windowed: bool,
        verbose: bool,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            windowed,
            verbose,
        }
    }

    /// Open the editor on the test project. Always windowed.
    pub fn editor(engine: &Path, config: &LauncherConfig, verbose: bool) -> Self {
        let args = vec![
            OsString::from("--path"),
            config.project_path().as_os_str().to_owned(),
            OsString::from("--editor"),
        ];
        Self::new(engine, args, true, verbose)
    }

    /// Run the GUT test suite, optionally narrowed to one file or case.
    pub fn tests(
        engine: &Path,
        config: &LauncherConfig,
        selection: &TestSelection,
        windowed: bool,
        verbose: bool,
        debug: bool,
    ) -> Self {
        let layout = config.layout();
        let mut args = vec![
            OsString::from("--path"),
            config.project_path().as_os_str().to_owned(),
            OsString::from("--fixed-fps"),
            OsString::from(layout.fixed_fps.to_string()),
        ];
        // GUT only understands the short form.
        if debug {
            args.push(OsString::from("-d"));
        }
        args.push(OsString::from("-s"));
        args.push(config.gut_script().into_os_string());

        if let Some(test_file) = &selection.test_file {
            let res_file = resource_path(&layout.resource_prefix, test_file);
            args.push(OsString::from(format!("-gtest={res_file}")));
            // Otherwise GUT also collects every script under the `.gutconfig.json` dirs.
            args.push(OsString::from("-gdir="));
        }
        if let Some(test_case) = &selection.test_case {
            args.push(OsString::from(format!("-gunit_test_name={test_case}")));
        }
        if !windowed {
            args.push(OsString::from("-gexit=true"));
        }

        Self::new(engine, args, windowed, verbose)
    }

    /// Dump the engine class reference into `output_dir`.
    pub fn doc(engine: &Path, output_dir: &Path, windowed: bool, verbose: bool) -> Self {
        let args = vec![
            OsString::from("--doctool"),
            output_dir.as_os_str().to_owned(),
        ];
        Self::new(engine, args, windowed, verbose)
    }

    /// Returns the engine binary.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Returns the tool arguments, without display or verbosity flags.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Returns the full argument vector, program first.
    ///
    /// `--no-window` is inserted right after the program when not windowed,
    /// then `--verbose` in front of it when verbose.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 3);
        argv.push(self.program.as_os_str().to_owned());
        argv.extend(self.args.iter().cloned());
        if !self.windowed {
            argv.insert(1, OsString::from(NO_WINDOW_FLAG));
        }
        if self.verbose {
            argv.insert(1, OsString::from(VERBOSE_FLAG));
        }
        argv
    }
}

/// Map a test file relative to the Goost root into the engine's resource tree.
pub fn resource_path(prefix: &str, test_file: &str) -> String {
    let normalized = test_file.replace('\\', "/");
    let relative = normalized.strip_prefix("./").unwrap_or(&normalized);
    format!("{prefix}{relative}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LauncherConfig {
        LauncherConfig::builder().root("/goost").build()
    }

    fn strings(argv: &[OsString]) -> Vec<String> {
        argv.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    fn engine() -> PathBuf {
        PathBuf::from("/goost/godot/bin/godot.x11")
    }

    #[test]
    fn test_should_insert_no_window_flag_when_headless() {
        let inv = Invocation::new(engine(), vec![OsString::from("--editor")], false, false);
        let argv = strings(&inv.argv());
        assert_eq!(argv, ["/goost/godot/bin/godot.x11", "--no-window", "--editor"]);
    }

    #[test]
    fn test_should_omit_no_window_flag_when_windowed() {
        let inv = Invocation::new(engine(), vec![OsString::from("--editor")], true, false);
        let argv = strings(&inv.argv());
        assert!(!argv.iter().any(|a| a == NO_WINDOW_FLAG));
        assert_eq!(argv.len(), 2);
    }

    #[test]
    fn test_should_put_verbose_flag_first() {
        for windowed in [false, true] {
            let inv = Invocation::new(engine(), vec![], windowed, true);
            let argv = strings(&inv.argv());
            assert_eq!(argv[1], VERBOSE_FLAG);
            if !windowed {
                assert_eq!(argv[2], NO_WINDOW_FLAG);
            }
        }
    }

    #[test]
    fn test_should_build_editor_invocation() {
        let inv = Invocation::editor(&engine(), &config(), false);
        assert_eq!(
            strings(&inv.argv()),
            ["/goost/godot/bin/godot.x11", "--path", "tests/project", "--editor"]
        );
    }

    #[test]
    fn test_should_build_default_tests_invocation() {
        let inv = Invocation::tests(
            &engine(),
            &config(),
            &TestSelection::default(),
            false,
            false,
            false,
        );
        assert_eq!(
            strings(&inv.argv()),
            [
                "/goost/godot/bin/godot.x11",
                "--no-window",
                "--path",
                "tests/project",
                "--fixed-fps",
                "15",
                "-s",
                "/goost/tests/project/addons/gut/gut_cmdln.gd",
                "-gexit=true",
            ]
        );
    }

    #[test]
    fn test_should_target_single_test_file() {
        let selection = TestSelection {
            test_file: Some("core/math/test_random.gd".to_owned()),
            test_case: None,
        };
        let inv = Invocation::tests(&engine(), &config(), &selection, false, false, false);
        let args = strings(inv.args());

        assert!(args.contains(&"-gtest=res://goost/core/math/test_random.gd".to_owned()));
        assert!(args.contains(&"-gdir=".to_owned()));
    }

    #[test]
    fn test_should_filter_by_test_case() {
        let selection = TestSelection {
            test_file: None,
            test_case: Some("test_range".to_owned()),
        };
        let inv = Invocation::tests(&engine(), &config(), &selection, false, false, false);
        let args = strings(inv.args());

        assert!(args.contains(&"-gunit_test_name=test_range".to_owned()));
        assert!(!args.iter().any(|a| a.starts_with("-gtest=")));
        assert!(!args.contains(&"-gdir=".to_owned()));
    }

    #[test]
    fn test_should_not_exit_tests_when_windowed() {
        let inv = Invocation::tests(
            &engine(),
            &config(),
            &TestSelection::default(),
            true,
            false,
            false,
        );
        let argv = strings(&inv.argv());
        assert!(!argv.contains(&"-gexit=true".to_owned()));
        assert!(!argv.contains(&NO_WINDOW_FLAG.to_owned()));
    }

    #[test]
    fn test_should_place_debug_flag_before_script() {
        let inv = Invocation::tests(
            &engine(),
            &config(),
            &TestSelection::default(),
            false,
            false,
            true,
        );
        let args = strings(inv.args());
        let debug = args.iter().position(|a| a == "-d").expect("debug flag");
        let script = args.iter().position(|a| a == "-s").expect("script flag");
        assert!(debug < script);
    }

    #[test]
    fn test_should_build_doc_invocation() {
        let inv = Invocation::doc(&engine(), Path::new("/goost/doc/godot"), false, true);
        assert_eq!(
            strings(&inv.argv()),
            [
                "/goost/godot/bin/godot.x11",
                "--verbose",
                "--no-window",
                "--doctool",
                "/goost/doc/godot",
            ]
        );
    }

    #[test]
    fn test_should_map_test_file_to_resource_path() {
        assert_eq!(
            resource_path("res://goost/", "core/math/test_random.gd"),
            "res://goost/core/math/test_random.gd"
        );
        assert_eq!(
            resource_path("res://goost/", "./scene/test_grid.gd"),
            "res://goost/scene/test_grid.gd"
        );
        assert_eq!(
            resource_path("res://goost/", "core\\types\\test_list.gd"),
            "res://goost/core/types/test_list.gd"
        );
    }
}
