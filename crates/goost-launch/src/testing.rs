//! Test helpers: a shell script standing in for the engine binary.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const ARGS_FILE: &str = "args.txt";

/// Write an executable script into `dir` that records its arguments to
/// `args.txt` next to itself and then runs `body`.
pub(crate) fn fake_engine(dir: &Path, body: &str) -> PathBuf {
    write_fake_engine(&dir.join("engine.sh"), body)
}

/// Same as [`fake_engine`], at an explicit path.
pub(crate) fn write_fake_engine(path: &Path, body: &str) -> PathBuf {
    let script = format!(
        "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > \"$(dirname \"$0\")/{ARGS_FILE}\"\n{body}\n"
    );
    fs::write(path, script).expect("should write fake engine");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("should make fake engine executable");
    path.to_path_buf()
}

/// Arguments the fake engine in `dir` was last called with.
pub(crate) fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join(ARGS_FILE))
        .expect("fake engine should have recorded its arguments")
        .lines()
        .map(str::to_owned)
        .collect()
}
