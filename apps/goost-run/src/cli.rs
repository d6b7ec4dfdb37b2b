use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use goost_launch::{Launcher, LauncherConfig, LauncherError, RunFlags, TestSelection, Tool};

#[derive(Debug, Parser)]
#[command(
    name = "goost-run",
    about = "Run the Godot editor, Goost unit tests, or the doc tool against a local engine build"
)]
pub struct Cli {
    /// Path to the Goost repository root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Run in windowed mode
    #[arg(long, global = true)]
    pub windowed: bool,

    /// Run in verbose mode
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Run in debug mode
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run Godot editor
    Editor,

    /// Run Goost unit tests
    Tests {
        /// A relative path to test file to run, for instance: "core/math/test_random.gd"
        #[arg(short = 't', long)]
        test_file: Option<String>,

        /// Name of a test case to run. Any test case matching the name will be run
        #[arg(short = 'c', long)]
        test_case: Option<String>,
    },

    /// Generate documentation
    Doc,
}

impl Commands {
    fn into_tool(self) -> Tool {
        match self {
            Commands::Editor => Tool::Editor,
            Commands::Tests {
                test_file,
                test_case,
            } => Tool::Tests(TestSelection {
                test_file,
                test_case,
            }),
            Commands::Doc => Tool::Doc,
        }
    }
}

impl Cli {
    pub fn flags(&self) -> RunFlags {
        RunFlags {
            windowed: self.windowed,
            verbose: self.verbose,
            debug: self.debug,
        }
    }

    /// Run the selected tool and return the status to exit with.
    ///
    /// Launcher failures are reported here and exit with 255; otherwise the
    /// engine's own exit code is returned.
    pub async fn run(self) -> ExitCode {
        match self.launch().await {
            Ok(code) => exit_status(code),
            Err(e) => {
                eprintln!("Error: {e}");
                if e.needs_build() {
                    eprintln!("Please run `scons` command first.");
                }
                ExitCode::from(e.exit_code())
            }
        }
    }

    async fn launch(self) -> Result<i32, LauncherError> {
        let flags = self.flags();
        let root = std::path::absolute(&self.root)?;
        let config = LauncherConfig::builder().root(root).build();
        let launcher = Launcher::new(config)?;
        launcher.run(self.command.into_tool(), flags).await
    }
}

fn exit_status(code: i32) -> ExitCode {
    ExitCode::from(truncate_exit_code(code))
}

/// Truncate an engine exit code to the 0..=255 range the OS reports.
fn truncate_exit_code(code: i32) -> u8 {
    (code & 0xff) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_global_flags_before_subcommand() {
        let cli =
            Cli::try_parse_from(["goost-run", "--windowed", "--verbose", "editor"]).unwrap();

        assert!(matches!(cli.command, Commands::Editor));
        assert_eq!(
            cli.flags(),
            RunFlags {
                windowed: true,
                verbose: true,
                debug: false,
            }
        );
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn test_should_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["goost-run", "doc", "--debug", "--root", "/src/goost"])
            .unwrap();

        assert!(matches!(cli.command, Commands::Doc));
        assert!(cli.flags().debug);
        assert_eq!(cli.root, PathBuf::from("/src/goost"));
    }

    #[test]
    fn test_should_parse_test_selection() {
        let cli = Cli::try_parse_from([
            "goost-run",
            "tests",
            "-t",
            "core/math/test_random.gd",
            "--test-case",
            "test_seed",
        ])
        .unwrap();

        assert_eq!(
            cli.command.into_tool(),
            Tool::Tests(TestSelection {
                test_file: Some("core/math/test_random.gd".to_owned()),
                test_case: Some("test_seed".to_owned()),
            })
        );
    }

    #[test]
    fn test_should_default_to_running_all_tests() {
        let cli = Cli::try_parse_from(["goost-run", "tests"]).unwrap();
        assert_eq!(cli.flags(), RunFlags::default());
        assert_eq!(cli.command.into_tool(), Tool::Tests(TestSelection::default()));
    }

    #[test]
    fn test_should_require_subcommand() {
        assert!(Cli::try_parse_from(["goost-run", "--verbose"]).is_err());
    }

    #[test]
    fn test_should_match_subcommands_exactly() {
        assert!(Cli::try_parse_from(["goost-run", "editor2"]).is_err());
        assert!(Cli::try_parse_from(["goost-run", "test"]).is_err());
        assert!(Cli::try_parse_from(["goost-run", "docs"]).is_err());
    }

    #[test]
    fn test_should_truncate_exit_codes() {
        assert_eq!(truncate_exit_code(0), 0);
        assert_eq!(truncate_exit_code(3), 3);
        assert_eq!(truncate_exit_code(256 + 7), 7);
        assert_eq!(truncate_exit_code(-1), 255);
    }

    #[tokio::test]
    async fn test_should_abort_when_engine_checkout_missing() {
        let dir = tempfile::TempDir::new().expect("should create temp dir");
        let root = dir.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["goost-run", "--root", root.as_str(), "tests"]).unwrap();

        let err = cli.launch().await.unwrap_err();
        assert!(matches!(err, LauncherError::RepositoryNotFound(_)));
        assert_eq!(err.exit_code(), 255);
    }
}
