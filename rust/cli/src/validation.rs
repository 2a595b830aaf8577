//! Input parsing and validation for interactive commands.
//!
//! This module provides functions for parsing and validating user input in
//! interactive CLI commands. It handles:
//! - Table command parsing (deal, hit, stand, hold, draw, bet changes)
//! - Weight override specs (`AS:dealer=3`) for the catalog command
//!
//! ## Error Handling
//!
//! Validation functions return structured `Result` types or custom enums
//! (like `ParseResult`) to provide clear error messages to users.

use casino_engine::catalog::Perspective;
use casino_engine::game::{Action, GameKind};
use casino_engine::ledger::INSERT_CREDITS;
use casino_engine::rules::BetChange;

/// A command entered at the table prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    /// Forwarded to the engine as-is
    Act(Action),
    /// Toggle holds on the given 0-based river slots, in order
    Hold(Vec<usize>),
    /// Cycle the dealing speed
    Speed,
    /// Print the pay table at the current bet
    PayTable,
    /// Print the command list
    Help,
    /// Add credits to the account
    Insert(u64),
    /// Cash out the whole balance
    Withdraw,
}

/// Result type for parsing user input at the table prompt.
///
/// This enum represents the three possible outcomes when parsing user input:
/// - Valid table command
/// - Quit command (user wants to leave the table)
/// - Invalid input with error message
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid command parsed from input
    Command(TableCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Command summary printed by `help`.
pub fn help_text(game: GameKind) -> &'static str {
    match game {
        GameKind::Blackjack => {
            "deal | hit (h) | stand (s) | bet <n> | + | - | max | insert [n] | withdraw | speed | q"
        }
        GameKind::Poker => {
            "deal | hold <slot>... | draw | bet <n> | + | - | max | pays | insert [n] | withdraw | speed | q"
        }
    }
}

/// Parse a line typed at the table into a [`TableCommand`].
///
/// Accepts the following input formats (case-insensitive):
/// - "d" or "deal" → Deal
/// - "bet N" → set the bet to N units; "+", "-", "max" adjust it
/// - "h"/"hit", "s"/"stand" → Blackjack actions
/// - "hold 1 3" → toggle holds on river slots 1 and 3 (Poker)
/// - "draw" → replace unheld cards (Poker)
/// - "insert [N]" → add N credits (default 2000), "withdraw" → cash out
/// - "speed", "pays", "help"
/// - "q" or "quit" → Quit command
///
/// # Example
///
/// ```rust
/// # use casino_cli::validation::{parse_table_command, ParseResult, TableCommand};
/// use casino_engine::game::{Action, GameKind};
///
/// assert_eq!(
///     parse_table_command("hit", GameKind::Blackjack),
///     ParseResult::Command(TableCommand::Act(Action::Hit))
/// );
/// assert_eq!(
///     parse_table_command("hold 1 5", GameKind::Poker),
///     ParseResult::Command(TableCommand::Hold(vec![0, 4]))
/// );
/// assert_eq!(parse_table_command("q", GameKind::Poker), ParseResult::Quit);
///
/// match parse_table_command("hit", GameKind::Poker) {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_table_command(input: &str, game: GameKind) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    if head == "q" || head == "quit" {
        return ParseResult::Quit;
    }

    let act = |a: Action| ParseResult::Command(TableCommand::Act(a));
    match (head, game) {
        ("d" | "deal", _) => act(Action::Deal),
        ("+" | "up", _) => act(Action::AdjustBet(BetChange::Raise)),
        ("-" | "down", _) => act(Action::AdjustBet(BetChange::Lower)),
        ("max", _) => act(Action::AdjustBet(BetChange::Max)),
        ("bet", _) => match parts.get(1).map(|s| s.parse::<u32>()) {
            None => ParseResult::Invalid("Bet requires an amount (e.g., 'bet 3')".to_string()),
            Some(Ok(units)) => act(Action::AdjustBet(BetChange::Set(units))),
            Some(Err(_)) => ParseResult::Invalid("Invalid bet amount".to_string()),
        },
        ("insert", _) => match parts.get(1).map(|s| s.parse::<u64>()) {
            None => ParseResult::Command(TableCommand::Insert(INSERT_CREDITS)),
            Some(Ok(0)) | Some(Err(_)) => {
                ParseResult::Invalid("Invalid credit amount (e.g., 'insert 2000')".to_string())
            }
            Some(Ok(credits)) => ParseResult::Command(TableCommand::Insert(credits)),
        },
        ("withdraw", _) => ParseResult::Command(TableCommand::Withdraw),
        ("speed", _) => ParseResult::Command(TableCommand::Speed),
        ("help" | "?", _) => ParseResult::Command(TableCommand::Help),
        ("h" | "hit", GameKind::Blackjack) => act(Action::Hit),
        ("s" | "stand", GameKind::Blackjack) => act(Action::Stand),
        ("hold", GameKind::Poker) => parse_hold(&parts[1..]),
        ("draw", GameKind::Poker) => act(Action::Draw),
        ("pays" | "paytable", GameKind::Poker) => ParseResult::Command(TableCommand::PayTable),
        _ => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: {}",
            head,
            help_text(game)
        )),
    }
}

fn parse_hold(args: &[&str]) -> ParseResult {
    if args.is_empty() {
        return ParseResult::Invalid("Hold requires slot numbers (e.g., 'hold 1 3')".to_string());
    }
    let mut slots = Vec::with_capacity(args.len());
    for a in args {
        match a.parse::<usize>() {
            Ok(n) if n >= 1 => slots.push(n - 1),
            _ => return ParseResult::Invalid(format!("Invalid slot '{}' (use 1-5)", a)),
        }
    }
    ParseResult::Command(TableCommand::Hold(slots))
}

/// A parsed `--set` weight override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightSpec {
    pub card: String,
    /// `None` applies the weight to both perspectives
    pub perspective: Option<Perspective>,
    pub weight: u32,
}

/// Parse a weight override of the form `CARD[:player|dealer]=WEIGHT`.
///
/// The card name is passed through untouched; the catalog rejects unknown
/// cards when the override is applied.
///
/// # Example
///
/// ```rust
/// # use casino_cli::validation::parse_weight_spec;
/// use casino_engine::catalog::Perspective;
///
/// let spec = parse_weight_spec("AS:dealer=3").unwrap();
/// assert_eq!(spec.card, "AS");
/// assert_eq!(spec.perspective, Some(Perspective::Dealer));
/// assert_eq!(spec.weight, 3);
///
/// assert_eq!(parse_weight_spec("10h=0").unwrap().perspective, None);
/// assert!(parse_weight_spec("AS:house=3").is_err());
/// ```
pub fn parse_weight_spec(spec: &str) -> Result<WeightSpec, String> {
    let (target, weight) = spec
        .split_once('=')
        .ok_or_else(|| format!("Invalid weight spec '{}' (expected CARD[:player|dealer]=N)", spec))?;
    let weight: u32 = weight
        .trim()
        .parse()
        .map_err(|_| format!("Invalid weight '{}' in '{}'", weight.trim(), spec))?;
    let (card, perspective) = match target.split_once(':') {
        None => (target, None),
        Some((card, p)) => {
            let p = match p.trim().to_ascii_lowercase().as_str() {
                "player" | "p" => Perspective::Player,
                "dealer" | "d" => Perspective::Dealer,
                other => return Err(format!("Unknown perspective '{}' (player or dealer)", other)),
            };
            (card, Some(p))
        }
    };
    let card = card.trim();
    if card.is_empty() {
        return Err(format!("Missing card in '{}'", spec));
    }
    Ok(WeightSpec {
        card: card.to_string(),
        perspective,
        weight,
    })
}
