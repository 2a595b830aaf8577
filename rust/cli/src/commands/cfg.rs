//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the current
//! table configuration with the source of each value (default, environment,
//! or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "starting_credits": {
//!     "value": 10000,
//!     "source": "default"
//!   },
//!   "max_bet": {
//!     "value": 5,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// Loads the current configuration with source tracking and displays it
/// as formatted JSON to the output stream.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_credits": {
            "value": config.starting_credits,
            "source": sources.starting_credits,
        },
        "bet_unit": {
            "value": config.bet_unit,
            "source": sources.bet_unit,
        },
        "max_bet": {
            "value": config.max_bet,
            "source": sources.max_bet,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "speed": {
            "value": config.speed,
            "source": sources.speed,
        },
        "win_rule": {
            "value": config.win_rule,
            "source": sources.win_rule,
        },
        "pay_table": {
            "value": config.pay_table,
            "source": sources.pay_table,
        },
        "weights": {
            "value": config.weights,
            "source": sources.weights,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
