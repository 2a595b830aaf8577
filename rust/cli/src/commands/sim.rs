//! Simulation command: plays rounds with a fixed strategy.
//!
//! Blackjack stands at once under the lower-wins rule and hits below 17
//! under higher-wins. Poker keeps a made straight or better whole and
//! otherwise holds every paired rank.
//!
//! # Examples
//!
//! ```no_run
//! use casino_cli::commands::handle_sim_command;
//! use casino_engine::game::GameKind;
//! use std::io;
//!
//! let mut out = io::stdout();
//! let mut err = io::stderr();
//! handle_sim_command(GameKind::Poker, 1000, Some(42), 1, None, &mut out, &mut err).unwrap();
//! ```

use crate::config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use casino_engine::blackjack::WinRule;
use casino_engine::errors::GameError;
use casino_engine::game::{CardView, GameKind, GameStep, Resolution, Variant};
use casino_engine::ledger::{Account, Ledger};
use casino_engine::logger::{RoundLogger, RoundRecord};
use casino_engine::poker::Category;
use casino_engine::rules::BetChange;
use casino_engine::session::Session;
use std::collections::BTreeMap;
use std::io::Write;

/// Higher-wins players hit below this effective value.
const HIT_BELOW: u32 = 17;

/// Handle the sim command.
///
/// Plays up to `rounds` rounds at a fixed bet and prints a JSON summary.
/// The run stops early once the balance cannot cover the bet.
pub fn handle_sim_command(
    game: GameKind,
    rounds: u64,
    seed: Option<u64>,
    bet: u32,
    log: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut session = Session::new(
        game,
        cfg.session_config(seed),
        cfg.build_catalog()?,
        Account::new(cfg.starting_credits),
    );
    session.adjust_bet(BetChange::Set(bet))?;

    let mut logger = match log {
        Some(path) => {
            ensure_parent_dir(std::path::Path::new(&path)).map_err(CliError::InvalidInput)?;
            Some(RoundLogger::create(&path)?)
        }
        None => None,
    };

    let mut tally = Tally::default();
    for _ in 0..rounds {
        match play_round(&mut session) {
            Ok(resolution) => {
                tally.add(&resolution);
                if let Some(l) = logger.as_mut() {
                    let id = l.next_id();
                    if let Some(rec) =
                        RoundRecord::from_table(id, Some(seed), session.table(), session.balance())
                    {
                        l.write(&rec)?;
                    }
                }
            }
            Err(GameError::InvalidBet { .. }) => {
                ui::display_warning(
                    err,
                    &format!("balance exhausted after {} rounds", tally.rounds),
                )?;
                break;
            }
            Err(e) if e.aborts_round() => {
                tally.aborted += 1;
                tracing::warn!(error = %e, "simulated round aborted");
            }
            Err(e) => return Err(e.into()),
        }
        session.drain_events();
    }

    let account = session.ledger();
    let summary = serde_json::json!({
        "game": game,
        "seed": seed,
        "rounds": tally.rounds,
        "aborted": tally.aborted,
        "wagered": tally.wagered,
        "paid": tally.paid,
        "spent": account.credits_spent(),
        "earned": account.credits_earned(),
        "balance": account.balance(),
        "outcomes": tally.outcomes,
    });
    let json_output = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}

#[derive(Default)]
struct Tally {
    rounds: u64,
    aborted: u64,
    wagered: u64,
    paid: u64,
    outcomes: BTreeMap<&'static str, u64>,
}

impl Tally {
    fn add(&mut self, r: &Resolution) {
        self.rounds += 1;
        self.wagered += r.wager;
        self.paid += r.payout;
        *self.outcomes.entry(r.label).or_insert(0) += 1;
    }
}

fn play_round(session: &mut Session) -> Result<Resolution, GameError> {
    session.deal()?;
    match session.table().kind() {
        GameKind::Blackjack => play_blackjack(session),
        GameKind::Poker => play_poker(session),
    }
}

fn play_blackjack(session: &mut Session) -> Result<Resolution, GameError> {
    let higher_wins = matches!(
        session.table().variant(),
        Variant::Blackjack(r) if r.win_rule() == WinRule::Higher
    );
    while higher_wins && session.table().step() == GameStep::PlayerTurn {
        let value = session
            .snapshot()
            .player_value
            .map_or(0, |v| v.effective());
        if value >= HIT_BELOW {
            break;
        }
        if let Some(bust) = session.hit()? {
            return Ok(bust);
        }
    }
    session.stand()
}

fn play_poker(session: &mut Session) -> Result<Resolution, GameError> {
    let snap = session.snapshot();
    for slot in holds(&snap.river, snap.preview) {
        session.toggle_hold(slot)?;
    }
    session.draw()
}

/// Slots to keep before the draw.
fn holds(river: &[CardView], preview: Option<Category>) -> Vec<usize> {
    let made = matches!(
        preview,
        Some(
            Category::RoyalFlush
                | Category::StraightFlush
                | Category::FourOfAKind
                | Category::FullHouse
                | Category::Flush
                | Category::Straight
        )
    );
    if made {
        return (0..river.len()).collect();
    }
    let mut counts: BTreeMap<_, usize> = BTreeMap::new();
    for c in river {
        *counts.entry(c.rank).or_insert(0) += 1;
    }
    river
        .iter()
        .enumerate()
        .filter(|(_, c)| counts[&c.rank] >= 2)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use casino_engine::cards::{Card, DealtCard};
    use serial_test::serial;

    fn river(cards: &[&str]) -> Vec<CardView> {
        cards
            .iter()
            .map(|s| CardView::from(&DealtCard::face_up(s.parse::<Card>().unwrap())))
            .collect()
    }

    #[test]
    fn test_holds_pairs_only() {
        let r = river(&["AS", "7D", "AH", "7C", "2S"]);
        assert_eq!(holds(&r, Some(Category::TwoPair)), vec![0, 1, 2, 3]);
        let r = river(&["AS", "7D", "KH", "9C", "2S"]);
        assert!(holds(&r, None).is_empty());
    }

    #[test]
    fn test_holds_made_hand() {
        let r = river(&["2S", "3D", "4H", "5C", "6S"]);
        assert_eq!(holds(&r, Some(Category::Straight)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    #[serial]
    fn test_sim_summary_balances() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(GameKind::Poker, 20, Some(5), 2, None, &mut out, &mut err).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["rounds"], 20);
        assert_eq!(json["wagered"], 20 * 100);
        let paid = json["paid"].as_u64().unwrap();
        assert_eq!(json["balance"].as_u64().unwrap(), 10_000 - 2_000 + paid);
        let outcomes: u64 = json["outcomes"]
            .as_object()
            .unwrap()
            .values()
            .map(|v| v.as_u64().unwrap())
            .sum();
        assert_eq!(outcomes, 20);
    }

    #[test]
    #[serial]
    fn test_sim_is_deterministic_for_seed() {
        let run = || {
            let mut out = Vec::new();
            let mut err = Vec::new();
            handle_sim_command(GameKind::Blackjack, 30, Some(11), 1, None, &mut out, &mut err)
                .unwrap();
            out
        };
        assert_eq!(run(), run());
    }

    #[test]
    #[serial]
    fn test_sim_stops_when_broke() {
        use casino_engine::cards::{Rank, full_deck};
        use std::io::Write as _;

        // Player always holds 20 from kings and queens; the dealer always
        // ties it with tens and jacks, and ties go to the house.
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for card in full_deck() {
            let player = u32::from(matches!(card.rank, Rank::King | Rank::Queen));
            let dealer = u32::from(matches!(card.rank, Rank::Ten | Rank::Jack));
            writeln!(
                file,
                "[[weights]]\ncard = \"{}\"\nplayer = {}\ndealer = {}\n",
                card, player, dealer
            )
            .unwrap();
        }
        unsafe {
            std::env::set_var("CASINO_CONFIG", file.path());
            std::env::set_var("CASINO_CREDITS", "120");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result =
            handle_sim_command(GameKind::Blackjack, 1_000, Some(3), 1, None, &mut out, &mut err);
        unsafe {
            std::env::remove_var("CASINO_CONFIG");
            std::env::remove_var("CASINO_CREDITS");
        }
        result.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["rounds"], 2);
        assert_eq!(json["balance"], 20);
        assert_eq!(json["outcomes"]["DEALER WON"], 2);
        assert!(String::from_utf8(err).unwrap().contains("balance exhausted after 2 rounds"));
    }

    #[test]
    #[serial]
    fn test_sim_writes_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("rounds.jsonl");
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(
            GameKind::Blackjack,
            5,
            Some(8),
            1,
            Some(path.to_string_lossy().into_owned()),
            &mut out,
            &mut err,
        )
        .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        let rec: RoundRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(rec.game, GameKind::Blackjack);
        assert_eq!(rec.seed, Some(8));
        assert!(rec.round_id.ends_with("-000001"));
    }
}
