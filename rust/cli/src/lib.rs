//! # Casino CLI Library
//!
//! Command-line front end for the weighted-deck casino engine. It exposes
//! subcommands for playing Blackjack and five-card draw Poker at the
//! terminal, simulating rounds, inspecting the card catalog, and analyzing
//! round logs.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["casino", "sim", "--game", "poker", "--rounds", "100"];
//! let code = casino_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `blackjack`: Play Blackjack interactively
//! - `poker`: Play five-card draw Poker interactively
//! - `sim`: Play rounds with a fixed strategy and print a summary
//! - `stats`: Aggregate statistics from a JSONL round log
//! - `catalog`: List card weights and draw chances
//! - `freq`: Compare observed draw frequencies with the weights
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
#[macro_use]
mod macros;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{CasinoCli, Commands};
use commands::{
    handle_catalog_command, handle_cfg_command, handle_freq_command, handle_play_command,
    handle_sim_command, handle_stats_command,
};
use casino_engine::game::GameKind;

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["casino", "catalog", "--json"];
/// let mut out = Vec::new();
/// let code = casino_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
///
/// # Available Commands
///
/// - `blackjack [--rounds N] [--seed N] [--bet N] [--speed 1-3] [--log FILE] [--no-pacing]`
/// - `poker` with the same options as `blackjack`
/// - `sim --game {blackjack|poker} --rounds N [--seed N] [--bet N] [--log FILE]`
/// - `stats --input FILE`
/// - `catalog [--set CARD[:player|dealer]=N]... [--json]`
/// - `freq [--perspective {player|dealer}] [--trials N] [--seed N]`
/// - `cfg`
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &[
        "blackjack", "poker", "sim", "stats", "catalog", "freq", "cfg",
    ];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = CasinoCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    // Print clap error first
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "");
                    write_or_exit!(err, "Weighted-deck casino CLI");
                    write_or_exit!(err, "Usage: casino <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: casino --help");
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Cfg => handle_cfg_command(out, err),
                Commands::Catalog { set, json } => handle_catalog_command(&set, json, out, err),
                Commands::Blackjack(args) => {
                    // Use stdin for real input (supports both TTY and piped stdin)
                    let stdin = std::io::stdin();
                    let mut stdin_lock = stdin.lock();
                    handle_play_command(GameKind::Blackjack, args, out, err, &mut stdin_lock)
                }
                Commands::Poker(args) => {
                    let stdin = std::io::stdin();
                    let mut stdin_lock = stdin.lock();
                    handle_play_command(GameKind::Poker, args, out, err, &mut stdin_lock)
                }
                Commands::Sim {
                    game,
                    rounds,
                    seed,
                    bet,
                    log,
                } => handle_sim_command(game.into(), rounds, seed, bet, log, out, err),
                Commands::Stats { input } => handle_stats_command(&input, out, err),
                Commands::Freq {
                    perspective,
                    trials,
                    seed,
                } => handle_freq_command(perspective.into(), trials, seed, out, err),
            };
            match result {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    write_or_exit!(err, "Error: {}", e);
                    exit_code::ERROR
                }
            }
        }
    }
}
