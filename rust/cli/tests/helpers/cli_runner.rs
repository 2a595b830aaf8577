use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment variables read by the config loader; cleared for every run so
/// the caller's shell cannot leak into a test.
const CONFIG_VARS: &[&str] = &[
    "CASINO_CONFIG",
    "CASINO_SEED",
    "CASINO_CREDITS",
    "CASINO_MAX_BET",
    "CASINO_BET_UNIT",
    "CASINO_SPEED",
    "CASINO_WIN_RULE",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone)]
pub struct CliRunner {
    binary: PathBuf,
    workdir: Option<PathBuf>,
}

impl CliRunner {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from(env!("CARGO_BIN_EXE_casino")),
            workdir: None,
        }
    }

    /// Runs the binary with `dir` as its working directory.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.workdir = Some(dir.to_path_buf());
        self
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        self.run_full(args, &[], None)
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CliResult {
        self.run_full(args, env, None)
    }

    pub fn run_with_input(&self, args: &[&str], input: &str) -> CliResult {
        self.run_full(args, &[], Some(input))
    }

    pub fn run_full(&self, args: &[&str], env: &[(&str, &str)], input: Option<&str>) -> CliResult {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG");
        for (k, v) in env {
            cmd.env(k, v);
        }
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().expect("spawn casino binary");
        {
            let mut stdin = child.stdin.take().expect("piped stdin");
            if let Some(text) = input {
                stdin.write_all(text.as_bytes()).expect("write stdin");
            }
            // dropping stdin closes the pipe so the binary sees EOF
        }
        let output = child.wait_with_output().expect("wait for casino binary");
        CliResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new()
    }
}
