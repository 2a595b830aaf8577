//! Shared helpers for the CLI integration tests.
//!
//! - `cli_runner`: runs the `casino` binary with arguments, environment and
//!   piped stdin, capturing exit code and output
//! - config and log fixtures written to a temporary directory

#![allow(dead_code)]

pub mod cli_runner;

use casino_engine::cards::{Card, full_deck};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a TOML config file into `dir` and returns its path.
pub fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("casino.toml");
    fs::write(&path, body).expect("write config");
    path
}

/// TOML `[[weights]]` tables giving each card the weights from `f`.
pub fn weights_toml(f: impl Fn(&Card) -> (u32, u32)) -> String {
    let mut body = String::new();
    for card in full_deck() {
        let (player, dealer) = f(&card);
        body.push_str(&format!(
            "[[weights]]\ncard = \"{}\"\nplayer = {}\ndealer = {}\n\n",
            card, player, dealer
        ));
    }
    body
}

/// Parses stdout as JSON, panicking with the raw output on failure.
pub fn stdout_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, stdout))
}
