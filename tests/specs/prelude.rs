//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

use similar_asserts::assert_eq;

/// Ledger header line as written to disk
pub const HEADER: &str =
    "Date,Radiator Name,Radiator ID,Coefficient,Raw Reading,Actual Value,Total,Valve Setting,Notes";

/// Registry of the documented example: Kitchen, Living Room, Gym
pub const SAMPLE_REGISTRY: &str = "id,name,coefficient\n0,Kitchen,1\n1,Living Room,2\n2,Gym,3\n";

/// Manual DMY entry for the 2025-2026 season
pub const MANUAL_CONFIG: &str = r#"{
  "date_format": "DMY",
  "date_mode": "manual",
  "tracked_year_start": 2025,
  "tracked_year_end": 2026
}
"#;

/// Answers for a run against `SAMPLE_REGISTRY` and `MANUAL_CONFIG`:
/// keep registry and preferences, then enter the documented readings
pub fn sample_session(date: &str) -> String {
    format!("\n\n{date}\n2\n10\n2.5\n7\n3\n15\n\n\nn\n")
}

/// A scratch home directory
pub struct Home {
    dir: tempfile::TempDir,
}

impl Home {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Home with the sample registry and manual preferences already saved
    pub fn seeded() -> Self {
        let home = Self::empty();
        home.file("radiators_registry.csv", SAMPLE_REGISTRY);
        home.file("config.json", MANUAL_CONFIG);
        home
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap()
    }

    pub fn ledger_path(&self, years: &str) -> PathBuf {
        self.path()
            .join("radiators_usage")
            .join(format!("radiators_usage_{years}.csv"))
    }

    /// Ledger rows below the header
    pub fn ledger_rows(&self, years: &str) -> Vec<csv::StringRecord> {
        let mut reader = csv::Reader::from_path(self.ledger_path(years)).unwrap();
        reader.records().map(|r| r.unwrap()).collect()
    }

    pub fn thermo(&self) -> Run {
        let mut cmd = Command::cargo_bin("thermo").unwrap();
        cmd.arg("--home").arg(self.path());
        cmd.env_remove("RUST_LOG");
        Run { cmd }
    }
}

/// A pending CLI invocation
pub struct Run {
    cmd: Command,
}

impl Run {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.cmd.write_stdin(input.into());
        self
    }

    /// Run and require exit code 0
    pub fn passes(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(
            outcome.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            outcome.stdout,
            outcome.stderr
        );
        outcome
    }

    /// Run and require a non-zero exit code
    pub fn fails(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(
            !outcome.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            outcome.stdout,
            outcome.stderr
        );
        outcome
    }
}

pub struct Outcome {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Outcome {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Outcome {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stdout),
            "stdout should contain {needle:?}\nstdout:\n{}",
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stderr),
            "stderr should contain {needle:?}\nstderr:\n{}",
            self.stderr
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).not().eval(&self.stdout),
            "stdout should not contain {needle:?}\nstdout:\n{}",
            self.stdout
        );
        self
    }

    pub fn code_is(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code));
        self
    }
}
