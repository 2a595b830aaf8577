use thiserror::Error;

use crate::catalog::Perspective;
use crate::game::{ActionKind, GameStep};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("No drawable card left for the {perspective:?} perspective (all remaining weights are zero)")]
    EmptyDeck { perspective: Perspective },
    #[error("Invalid bet: {bet} (allowed 1..={max_bet}, balance {balance})")]
    InvalidBet { bet: u32, max_bet: u32, balance: u64 },
    #[error("Weight target {target:?} is not in the catalog")]
    InvalidWeight { target: String },
    #[error("Action {action:?} is not accepted during {step:?}")]
    InvalidStateTransition { step: GameStep, action: ActionKind },
    #[error("Hold slot {slot} is out of range (0..5)")]
    InvalidSlot { slot: usize },
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl GameError {
    /// Only an exhausted deck invalidates the round in progress.
    pub fn aborts_round(&self) -> bool {
        matches!(self, GameError::EmptyDeck { .. })
    }
}
