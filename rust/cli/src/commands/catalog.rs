//! Catalog listing command.
//!
//! Prints the 52 reference cards with their player and dealer weights and the
//! chance each weight gives the card on a fresh deck. `--set` overrides are
//! applied on top of the configured weights before listing.

use crate::config;
use crate::error::CliError;
use crate::formatters::format_catalog;
use crate::ui;
use crate::validation::parse_weight_spec;
use casino_engine::catalog::{Catalog, Perspective};
use std::io::Write;

/// Handle the catalog command.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for a malformed `--set` spec and
/// `CliError::Engine` when the spec names a card that is not catalogued.
pub fn handle_catalog_command(
    set: &[String],
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let mut catalog = cfg.build_catalog()?;

    for raw in set {
        let spec = match parse_weight_spec(raw) {
            Ok(s) => s,
            Err(msg) => {
                ui::write_error(err, &msg)?;
                return Err(CliError::InvalidInput(msg));
            }
        };
        let perspectives = match spec.perspective {
            Some(p) => vec![p],
            None => vec![Perspective::Player, Perspective::Dealer],
        };
        for p in perspectives {
            catalog.set_weight_named(&spec.card, p, spec.weight)?;
        }
    }

    if json {
        write_catalog_json(&catalog, out)
    } else {
        write!(out, "{}", format_catalog(&catalog))?;
        for p in [Perspective::Player, Perspective::Dealer] {
            if catalog.total_weight(p) == 0 {
                ui::display_warning(
                    err,
                    &format!("every {:?} weight is zero; draws will fail", p),
                )?;
            }
        }
        Ok(())
    }
}

fn write_catalog_json(catalog: &Catalog, out: &mut dyn Write) -> Result<(), CliError> {
    let rows: Vec<serde_json::Value> = catalog
        .list()
        .into_iter()
        .map(|row| {
            let card = casino_engine::cards::Card::new(row.rank, row.suit);
            serde_json::json!({
                "card": format!("{}{}", row.rank.short_name(), suit_letter(row.suit)),
                "player_weight": row.player_weight,
                "dealer_weight": row.dealer_weight,
                "player_chance": catalog.chance_to_draw(card, Perspective::Player),
                "dealer_chance": catalog.chance_to_draw(card, Perspective::Dealer),
            })
        })
        .collect();
    let json_str = serde_json::to_string_pretty(&rows).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

// Letters round-trip through `--set` and config files.
fn suit_letter(suit: casino_engine::cards::Suit) -> char {
    use casino_engine::cards::Suit;
    match suit {
        Suit::Clubs => 'C',
        Suit::Spades => 'S',
        Suit::Hearts => 'H',
        Suit::Diamonds => 'D',
    }
}
