use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Credits (cents) per bet unit.
pub const BET_UNIT: u32 = 50;
/// Largest bet, in bet units.
pub const MAX_BET: u32 = 5;

/// Betting limits shared by both games.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableRules {
    pub bet_unit: u32,
    pub max_bet: u32,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            bet_unit: BET_UNIT,
            max_bet: MAX_BET,
        }
    }
}

impl TableRules {
    /// Credits at stake for `bet` units.
    pub fn wager(&self, bet: u32) -> u64 {
        u64::from(bet) * u64::from(self.bet_unit)
    }
}

/// A requested change to the current bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetChange {
    Raise,
    Lower,
    Max,
    Set(u32),
}

/// Applies a [`BetChange`] to the current bet.
///
/// Only the range `1..=max_bet` is enforced here; the balance is checked when
/// the bet is committed.
///
/// # Errors
///
/// Returns [`GameError::InvalidBet`] when the resulting bet leaves the range.
///
/// # Examples
///
/// ```
/// use casino_engine::rules::{adjust_bet, BetChange, TableRules};
///
/// let rules = TableRules::default();
/// assert_eq!(adjust_bet(1, BetChange::Raise, &rules, 1000), Ok(2));
/// assert_eq!(adjust_bet(3, BetChange::Max, &rules, 1000), Ok(5));
/// assert!(adjust_bet(1, BetChange::Lower, &rules, 1000).is_err());
/// ```
pub fn adjust_bet(
    current: u32,
    change: BetChange,
    rules: &TableRules,
    balance: u64,
) -> Result<u32, GameError> {
    let next = match change {
        BetChange::Raise => current.saturating_add(1),
        BetChange::Lower => current.saturating_sub(1),
        BetChange::Max => rules.max_bet,
        BetChange::Set(v) => v,
    };
    if next == 0 || next > rules.max_bet {
        return Err(GameError::InvalidBet {
            bet: next,
            max_bet: rules.max_bet,
            balance,
        });
    }
    Ok(next)
}

/// Validates a bet before it is committed and returns the wager in credits.
///
/// # Errors
///
/// Returns [`GameError::InvalidBet`] when the bet is outside `1..=max_bet` or
/// the wager exceeds `balance`.
///
/// # Examples
///
/// ```
/// use casino_engine::rules::{validate_bet, TableRules};
/// use casino_engine::errors::GameError;
///
/// let rules = TableRules::default();
/// assert_eq!(validate_bet(2, &rules, 1000), Ok(100));
/// assert!(matches!(validate_bet(6, &rules, 1000), Err(GameError::InvalidBet { .. })));
/// assert!(matches!(validate_bet(5, &rules, 200), Err(GameError::InvalidBet { .. })));
/// ```
pub fn validate_bet(bet: u32, rules: &TableRules, balance: u64) -> Result<u64, GameError> {
    let wager = rules.wager(bet);
    if bet == 0 || bet > rules.max_bet || wager > balance {
        return Err(GameError::InvalidBet {
            bet,
            max_bet: rules.max_bet,
            balance,
        });
    }
    Ok(wager)
}
