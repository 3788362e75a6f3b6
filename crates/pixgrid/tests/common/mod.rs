//! Shared harness for CLI tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Exit code for invalid commands (EX_USAGE).
pub const EXIT_USAGE: i32 = 64;
/// Exit code for unreadable scripts and unwritable destinations (EX_IOERR).
pub const EXIT_IOERR: i32 = 74;

/// Runs the binary inside a scratch directory so relative save paths land there.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir().join(name)
    }

    pub fn write_script(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write script");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("Failed to read output file")
    }

    pub fn cli_command(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pixgrid"));
        cmd.current_dir(self.dir())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("PIXGRID_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.cli_command().args(args).assert()
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> assert_cmd::assert::Assert {
        self.cli_command()
            .args(args)
            .write_stdin(stdin.to_string())
            .assert()
    }
}
