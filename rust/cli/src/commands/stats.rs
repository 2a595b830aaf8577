//! Statistics aggregation for round logs.
//!
//! Reads a JSONL file of [`RoundRecord`]s (as written by `--log`) and reports
//! per-game round counts, credits wagered and paid, and outcome counts.

use crate::error::CliError;
use crate::io_utils::read_text;
use crate::ui;
use casino_engine::logger::RoundRecord;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

#[derive(Default, serde::Serialize)]
struct GameStats {
    rounds: u64,
    wagered: u64,
    paid: u64,
    wins: u64,
    outcomes: BTreeMap<String, u64>,
}

/// Aggregates statistics from a JSONL round log.
///
/// Malformed lines are reported on `err` and skipped.
///
/// # Errors
///
/// Returns `CliError::Config` when the file cannot be read and
/// `CliError::InvalidInput` when no line in a non-empty file is a valid
/// record.
pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = match read_text(Path::new(input)) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
            return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
        }
    };

    let mut by_game: BTreeMap<String, GameStats> = BTreeMap::new();
    let mut lines = 0u64;
    let mut total = 0u64;
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        lines += 1;
        let rec: RoundRecord = parse_json_or_continue!(line, err, format!("line {}", i + 1));
        let stats = by_game.entry(rec.game.label().to_lowercase()).or_default();
        stats.rounds += 1;
        stats.wagered += rec.wager;
        stats.paid += rec.payout;
        if rec.payout > 0 {
            stats.wins += 1;
        }
        *stats.outcomes.entry(rec.result).or_insert(0) += 1;
        total += 1;
    }

    if lines > 0 && total == 0 {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }
    if lines > total {
        ui::display_warning(err, &format!("Skipped {} corrupted record(s)", lines - total))?;
    }

    let summary = serde_json::json!({
        "rounds": total,
        "games": by_game,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}
