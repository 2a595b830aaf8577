//! Draw frequency check for the weighted deck.
//!
//! The `freq` command draws one card from a freshly reset deck per trial and
//! compares how often each card came up with the chance its catalog weight
//! promises. Useful for checking a weight configuration before playing.

use crate::config;
use crate::error::CliError;
use crate::formatters::format_card;
use crate::ui;
use casino_engine::cards::Card;
use casino_engine::catalog::Perspective;
use casino_engine::deck::WeightedDeck;
use std::collections::BTreeMap;
use std::io::Write;

/// Handle the freq command.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` when `trials` is zero and
/// `CliError::Engine` when every weight for `perspective` is zero.
pub fn handle_freq_command(
    perspective: Perspective,
    trials: u64,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if trials == 0 {
        ui::write_error(err, "trials must be >= 1")?;
        return Err(CliError::InvalidInput("trials must be >= 1".to_string()));
    }
    let cfg = config::load()?;
    let catalog = cfg.build_catalog()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut deck = WeightedDeck::new_with_seed(seed);
    let mut counts: BTreeMap<Card, u64> = BTreeMap::new();
    for _ in 0..trials {
        deck.reset(&catalog);
        let card = deck.draw(&catalog, perspective)?;
        *counts.entry(card).or_insert(0) += 1;
    }

    writeln!(
        out,
        "freq: perspective={:?} trials={} seed={}",
        perspective, trials, seed
    )?;
    writeln!(out, "{:<6} {:>7} {:>9} {:>9}", "card", "weight", "expected", "observed")?;
    let mut max_dev = 0.0f64;
    for entry in catalog.entries() {
        let expected = catalog.chance_to_draw(entry.card, perspective);
        let observed = counts.get(&entry.card).copied().unwrap_or(0) as f64 / trials as f64;
        max_dev = max_dev.max((observed - expected).abs());
        writeln!(
            out,
            "{:<6} {:>7} {:>8.2}% {:>8.2}%",
            format_card(&entry.card),
            entry.weight(perspective),
            expected * 100.0,
            observed * 100.0
        )?;
    }
    writeln!(out, "max deviation: {:.2}%", max_dev * 100.0)?;
    Ok(())
}
