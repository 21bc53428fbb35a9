//! Common test helpers for integration tests

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn testproc_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_testproc"))
}

/// Run testproc in `dir` with an isolated HOME so no user config leaks in.
pub fn run_testproc(dir: &Path, args: &[&str]) -> Output {
    Command::new(testproc_binary())
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("TESTPROC_QUIET", "1")
        .env("NO_COLOR", "1")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run testproc binary")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
