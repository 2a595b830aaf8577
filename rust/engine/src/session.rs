//! Session root: owns the catalog, the ledger and the active table.
//!
//! Rounds never own the catalog; every draw borrows it from here, so a weight
//! edit made between draws is seen by the next draw and never by one already
//! in flight.

use serde::{Deserialize, Serialize};

use crate::blackjack::WinRule;
use crate::cards::{Card, Rank, Suit};
use crate::catalog::{Catalog, CatalogRow, Perspective};
use crate::errors::GameError;
use crate::game::{Action, ActionKind, CasinoTable, DealEvent, GameKind, Resolution, Snapshot, Variant};
use crate::ledger::{Account, Ledger};
use crate::poker::PayTable;
use crate::rules::{BetChange, TableRules};

const DEFAULT_SEED: u64 = 0xC0FF_EE00;

/// Construction parameters for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub seed: Option<u64>,
    pub rules: TableRules,
    pub win_rule: WinRule,
    pub pay_table: PayTable,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rules: TableRules::default(),
            win_rule: WinRule::default(),
            pay_table: PayTable::default(),
        }
    }
}

impl SessionConfig {
    fn variant(&self, kind: GameKind) -> Variant {
        match kind {
            GameKind::Blackjack => Variant::blackjack(self.win_rule),
            GameKind::Poker => Variant::poker(self.pay_table),
        }
    }
}

/// # Examples
///
/// ```
/// use casino_engine::catalog::{Catalog, Perspective};
/// use casino_engine::cards::{Rank, Suit};
/// use casino_engine::game::GameKind;
/// use casino_engine::ledger::Account;
/// use casino_engine::session::{Session, SessionConfig};
///
/// let mut session = Session::new(GameKind::Blackjack, SessionConfig::default(), Catalog::standard(), Account::default());
/// session.set_weight(Rank::Ace, Suit::Spades, Perspective::Dealer, 5).unwrap();
/// assert_eq!(session.list_catalog()[13].dealer_weight, 5);
/// session.deal().unwrap();
/// let resolution = session.stand().unwrap();
/// println!("{}: +{}", resolution.label, resolution.payout);
/// ```
#[derive(Debug)]
pub struct Session<L: Ledger = Account> {
    catalog: Catalog,
    ledger: L,
    table: CasinoTable,
    config: SessionConfig,
}

impl<L: Ledger> Session<L> {
    pub fn new(kind: GameKind, config: SessionConfig, catalog: Catalog, ledger: L) -> Self {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        let table = CasinoTable::new(config.variant(kind), config.rules, seed, &catalog);
        Self {
            catalog,
            ledger,
            table,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn table(&self) -> &CasinoTable {
        &self.table
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn list_catalog(&self) -> Vec<CatalogRow> {
        self.catalog.list()
    }

    /// # Errors
    ///
    /// [`GameError::InvalidWeight`] when `rank`/`suit` is not in the catalog.
    pub fn set_weight(
        &mut self,
        rank: Rank,
        suit: Suit,
        perspective: Perspective,
        weight: u32,
    ) -> Result<(), GameError> {
        self.catalog.set_weight(Card::new(rank, suit), perspective, weight)
    }

    /// Same as [`Session::set_weight`] with a textual card such as `"QH"`.
    pub fn set_weight_named(
        &mut self,
        name: &str,
        perspective: Perspective,
        weight: u32,
    ) -> Result<Card, GameError> {
        self.catalog.set_weight_named(name, perspective, weight)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.table.snapshot(self.ledger.balance())
    }

    pub fn drain_events(&mut self) -> Vec<DealEvent> {
        self.table.drain_events()
    }

    pub fn adjust_bet(&mut self, change: BetChange) -> Result<u32, GameError> {
        self.table.adjust_bet(change, self.ledger.balance())
    }

    pub fn deal(&mut self) -> Result<(), GameError> {
        self.table.deal(&self.catalog, &mut self.ledger)
    }

    pub fn hit(&mut self) -> Result<Option<Resolution>, GameError> {
        self.table.hit(&self.catalog, &mut self.ledger)
    }

    pub fn stand(&mut self) -> Result<Resolution, GameError> {
        self.table.stand(&self.catalog, &mut self.ledger)
    }

    pub fn toggle_hold(&mut self, slot: usize) -> Result<bool, GameError> {
        self.table.toggle_hold(slot)
    }

    pub fn draw(&mut self) -> Result<Resolution, GameError> {
        self.table.draw(&self.catalog, &mut self.ledger)
    }

    pub fn apply(&mut self, action: Action) -> Result<Option<Resolution>, GameError> {
        self.table.apply(action, &self.catalog, &mut self.ledger)
    }

    /// Resets round state for the presentation layer's "new round" request.
    pub fn reset_round(&mut self) -> Result<(), GameError> {
        if self.table.in_progress() {
            return Err(GameError::InvalidStateTransition {
                step: self.table.step(),
                action: ActionKind::Deal,
            });
        }
        self.table.reset_round(&self.catalog);
        Ok(())
    }

    /// Drops the round in progress. The wager stays spent and the catalog is
    /// untouched.
    pub fn abandon_round(&mut self) {
        if self.table.in_progress() {
            tracing::info!(game = ?self.table.kind(), wager = self.table.wager(), "round abandoned");
        }
        self.table.reset_round(&self.catalog);
    }

    pub fn switch_game(&mut self, kind: GameKind) -> Result<(), GameError> {
        if self.table.kind() == kind {
            return Ok(());
        }
        self.table.switch_variant(self.config.variant(kind), &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStep;

    fn session(kind: GameKind) -> Session {
        let config = SessionConfig {
            seed: Some(42),
            ..SessionConfig::default()
        };
        Session::new(kind, config, Catalog::standard(), Account::default())
    }

    #[test]
    fn weight_edits_persist_across_rounds() {
        let mut s = session(GameKind::Blackjack);
        s.set_weight(Rank::King, Suit::Hearts, Perspective::Player, 7).unwrap();
        s.deal().unwrap();
        s.stand().unwrap();
        s.deal().unwrap();
        let row = &s.list_catalog()[Card::new(Rank::King, Suit::Hearts).catalog_index()];
        assert_eq!(row.player_weight, 7);
        assert_eq!(row.dealer_weight, 1);
    }

    #[test]
    fn unknown_named_card_is_rejected_without_change() {
        let mut s = session(GameKind::Poker);
        let before = s.list_catalog();
        assert!(matches!(
            s.set_weight_named("1Z", Perspective::Dealer, 3),
            Err(GameError::InvalidWeight { .. })
        ));
        assert_eq!(s.list_catalog(), before);
    }

    #[test]
    fn abandon_keeps_wager_spent() {
        let mut s = session(GameKind::Poker);
        s.deal().unwrap();
        assert_eq!(s.balance(), 9_950);
        s.abandon_round();
        assert_eq!(s.balance(), 9_950);
        assert_eq!(s.table().step(), GameStep::Standby);
        assert_eq!(s.table().deck_remaining(), 52);
    }

    #[test]
    fn switch_game_only_between_rounds() {
        let mut s = session(GameKind::Blackjack);
        s.deal().unwrap();
        assert!(s.switch_game(GameKind::Poker).is_err());
        assert_eq!(s.table().kind(), GameKind::Blackjack);
        s.abandon_round();
        s.switch_game(GameKind::Poker).unwrap();
        assert_eq!(s.table().kind(), GameKind::Poker);
        assert!(s.reset_round().is_ok());
    }

    #[test]
    fn invalid_bet_leaves_balance_unchanged() {
        let mut s = Session::new(
            GameKind::Blackjack,
            SessionConfig::default(),
            Catalog::standard(),
            Account::new(120),
        );
        s.adjust_bet(BetChange::Set(3)).unwrap();
        assert!(matches!(s.deal(), Err(GameError::InvalidBet { .. })));
        assert_eq!(s.balance(), 120);
        assert_eq!(s.table().step(), GameStep::Standby);
        assert!(s.adjust_bet(BetChange::Set(6)).is_err());
        assert_eq!(s.table().bet(), 3);
    }
}
