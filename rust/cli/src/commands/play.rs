//! # Play Command
//!
//! Interactive Blackjack and Poker against the house.
//!
//! The player types commands at a prompt; every card the engine deals is
//! replayed through a [`Pacer`] so the table is dealt at the configured speed
//! rather than all at once.
//!
//! ## Features
//!
//! - Interactive input validation with clear error messages
//! - Speed cycling (`speed`) and `--no-pacing` for scripted input
//! - Graceful quit handling (user can exit with 'q' or 'quit', or EOF)
//! - Optional JSONL round log (`--log`)
//! - Credit insert and withdraw between rounds

use crate::cli::PlayArgs;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_card, format_pay_table, format_river, format_table};
use crate::io_utils::{ensure_parent_dir, read_stdin_line};
use crate::ui;
use crate::validation::{ParseResult, TableCommand, help_text, parse_table_command};
use casino_engine::game::{Action, DealEvent, GameKind, Resolution};
use casino_engine::ledger::Account;
use casino_engine::logger::{RoundLogger, RoundRecord};
use casino_engine::pacing::{GameSpeed, Pacer};
use casino_engine::rules::BetChange;
use casino_engine::session::Session;
use std::io::{BufRead, Write};

/// Handle the blackjack and poker commands: interactive table play.
///
/// # Returns
///
/// * `Ok(())` when the player quits, input ends, or `--rounds` is reached
/// * `Err(CliError)` for invalid arguments, configuration errors, or I/O errors
///
/// Engine rejections during play (an action at the wrong time, a bet the
/// balance cannot cover) are reported on `err` and the prompt continues.
pub fn handle_play_command(
    game: GameKind,
    args: PlayArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if args.rounds == Some(0) {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let cfg = config::load()?;
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let catalog = cfg.build_catalog()?;
    let mut session = Session::new(
        game,
        cfg.session_config(seed),
        catalog,
        Account::new(cfg.starting_credits),
    );
    if let Some(bet) = args.bet {
        session.adjust_bet(BetChange::Set(bet))?;
    }

    let speed = args
        .speed
        .and_then(GameSpeed::from_multiplier)
        .unwrap_or_else(|| cfg.game_speed());
    let mut table = PlayTable {
        session,
        pacer: Pacer::new(speed),
        pacing: !args.no_pacing,
        seed,
        logger: open_logger(args.log.as_deref())?,
    };

    writeln!(
        out,
        "{}: seed={} balance={} speed={}",
        game.label(),
        seed,
        table.session.balance(),
        speed.label()
    )?;
    writeln!(out, "Commands: {}", help_text(game))?;

    let mut resolved = 0u32;
    loop {
        ui::prompt(out, "> ")?;
        let Some(line) = read_stdin_line(stdin) else {
            break;
        };
        let command = match parse_table_command(&line, game) {
            ParseResult::Command(c) => c,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };
        if let Some(resolution) = table.run(command, out, err)? {
            resolved += 1;
            table.finish_round(&resolution, out)?;
            if args.rounds.is_some_and(|n| resolved >= n) {
                break;
            }
        }
    }

    if table.session.table().in_progress() {
        table.session.abandon_round();
        ui::display_warning(err, "round abandoned; the wager is lost")?;
    }
    writeln!(
        out,
        "Rounds: {}  Final balance: {}",
        resolved,
        table.session.balance()
    )?;
    Ok(())
}

fn open_logger(path: Option<&str>) -> Result<Option<RoundLogger>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    ensure_parent_dir(std::path::Path::new(path)).map_err(CliError::InvalidInput)?;
    Ok(Some(RoundLogger::create(path)?))
}

struct PlayTable {
    session: Session,
    pacer: Pacer,
    pacing: bool,
    seed: u64,
    logger: Option<RoundLogger>,
}

impl PlayTable {
    /// Runs one table command. Engine errors are reported, not returned.
    fn run(
        &mut self,
        command: TableCommand,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Option<Resolution>, CliError> {
        let game = self.session.table().kind();
        match command {
            TableCommand::Help => {
                writeln!(out, "{}", help_text(game))?;
                Ok(None)
            }
            TableCommand::Speed => {
                let speed = self.pacer.cycle_speed();
                writeln!(out, "Speed: {}", speed.label())?;
                Ok(None)
            }
            TableCommand::PayTable => {
                let t = self.session.table();
                let wager = t.rules().wager(t.bet());
                writeln!(
                    out,
                    "{}",
                    format_pay_table(&self.session.config().pay_table, wager)
                )?;
                Ok(None)
            }
            TableCommand::Insert(_) | TableCommand::Withdraw
                if self.session.table().in_progress() =>
            {
                ui::write_error(err, "Credits can only move between rounds")?;
                Ok(None)
            }
            TableCommand::Insert(credits) => {
                self.session.ledger_mut().insert(credits);
                writeln!(out, "Inserted {}. Balance: {}", credits, self.session.balance())?;
                Ok(None)
            }
            TableCommand::Withdraw => {
                let paid = self.session.ledger_mut().withdraw_all();
                writeln!(out, "Withdrew {}. Balance: {}", paid, self.session.balance())?;
                Ok(None)
            }
            TableCommand::Hold(slots) => {
                for slot in slots {
                    if let Err(e) = self.session.toggle_hold(slot) {
                        ui::write_error(err, &e.to_string())?;
                        break;
                    }
                }
                let snap = self.session.snapshot();
                if !snap.river.is_empty() {
                    writeln!(out, "{}", format_river(&snap.river, &snap.held))?;
                }
                Ok(None)
            }
            TableCommand::Act(action) => {
                let result = self.session.apply(action);
                self.replay_events(out)?;
                match result {
                    Ok(resolution) => {
                        if let Action::AdjustBet(_) = action {
                            writeln!(out, "Bet: {}", self.session.table().bet())?;
                        } else if resolution.is_none() {
                            writeln!(out, "{}", format_table(&self.session.snapshot()))?;
                        }
                        Ok(resolution)
                    }
                    Err(e) => {
                        ui::write_error(err, &e.to_string())?;
                        if e.aborts_round() {
                            ui::display_warning(err, "round cancelled; the wager was refunded")?;
                        }
                        Ok(None)
                    }
                }
            }
        }
    }

    fn replay_events(&mut self, out: &mut dyn Write) -> Result<(), CliError> {
        let game = self.session.table().kind();
        let events = self.session.drain_events();
        for (delay, event) in self.pacer.schedule(game, events) {
            if self.pacing {
                std::thread::sleep(delay);
            }
            writeln!(out, "{}", describe_event(&event))?;
        }
        Ok(())
    }

    fn finish_round(&mut self, resolution: &Resolution, out: &mut dyn Write) -> Result<(), CliError> {
        writeln!(out, "{}", format_table(&self.session.snapshot()))?;
        if resolution.payout > 0 {
            writeln!(out, "{}  +{}", resolution.label, resolution.payout)?;
        } else {
            writeln!(out, "{}", resolution.label)?;
        }
        if let Some(logger) = self.logger.as_mut() {
            let id = logger.next_id();
            if let Some(record) = RoundRecord::from_table(
                id,
                Some(self.seed),
                self.session.table(),
                self.session.balance(),
            ) {
                logger.write(&record)?;
            }
        }
        tracing::debug!(label = resolution.label, payout = resolution.payout, "round finished");
        Ok(())
    }
}

fn describe_event(event: &DealEvent) -> String {
    match event {
        DealEvent::Placed {
            seat,
            index,
            card,
            revealed,
        } => {
            let shown = if *revealed {
                format_card(card)
            } else {
                crate::formatters::HIDDEN_CARD.to_string()
            };
            format!("  {:?} #{} <- {}", seat, index + 1, shown)
        }
        DealEvent::Revealed { seat, index, card } => {
            format!("  {:?} #{} shows {}", seat, index + 1, format_card(card))
        }
    }
}
