//! Shared round state machine for both table games.
//!
//! A [`CasinoTable`] drives `Standby -> DealerTurn -> PlayerTurn -> Finished`
//! for whichever [`Variant`] it holds. The variant supplies the two hooks that
//! differ per game: what happens on entering a step and which actions a step
//! accepts. Every card placement or reveal is queued as a [`DealEvent`] for the
//! presentation layer; the table itself never waits on them.

use serde::{Deserialize, Serialize};

use crate::blackjack::{BlackjackOutcome, BlackjackRound, HandValue, WinRule};
use crate::cards::{Card, DealtCard, Rank, Suit};
use crate::catalog::{Catalog, Perspective};
use crate::deck::WeightedDeck;
use crate::errors::GameError;
use crate::ledger::Ledger;
use crate::poker::{Category, PayTable, PokerRound};
use crate::rules::{adjust_bet, validate_bet, BetChange, TableRules};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStep {
    Standby,
    DealerTurn,
    PlayerTurn,
    Finished,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Blackjack,
    Poker,
}

impl GameKind {
    pub fn label(self) -> &'static str {
        match self {
            GameKind::Blackjack => "Blackjack",
            GameKind::Poker => "Poker",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AdjustBet,
    Deal,
    Hit,
    Stand,
    ToggleHold,
    Draw,
    SwitchGame,
}

/// A request from the presentation layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    AdjustBet(BetChange),
    Deal,
    Hit,
    Stand,
    ToggleHold(usize),
    Draw,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::AdjustBet(_) => ActionKind::AdjustBet,
            Action::Deal => ActionKind::Deal,
            Action::Hit => ActionKind::Hit,
            Action::Stand => ActionKind::Stand,
            Action::ToggleHold(_) => ActionKind::ToggleHold,
            Action::Draw => ActionKind::Draw,
        }
    }
}

/// Where a card lands on the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player,
    Dealer,
    River,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DealEvent {
    Placed {
        seat: Seat,
        index: usize,
        card: Card,
        revealed: bool,
    },
    Revealed {
        seat: Seat,
        index: usize,
        card: Card,
    },
}

impl DealEvent {
    pub fn seat(&self) -> Seat {
        match self {
            DealEvent::Placed { seat, .. } | DealEvent::Revealed { seat, .. } => *seat,
        }
    }
}

/// Borrowed view of the round resources handed to the variant hooks.
pub struct RoundContext<'a> {
    deck: &'a mut WeightedDeck,
    catalog: &'a Catalog,
    events: &'a mut Vec<DealEvent>,
}

impl<'a> RoundContext<'a> {
    pub(crate) fn new(
        deck: &'a mut WeightedDeck,
        catalog: &'a Catalog,
        events: &'a mut Vec<DealEvent>,
    ) -> Self {
        Self {
            deck,
            catalog,
            events,
        }
    }

    pub(crate) fn draw(&mut self, perspective: Perspective) -> Result<Card, GameError> {
        self.deck.draw(self.catalog, perspective)
    }

    pub(crate) fn placed(&mut self, seat: Seat, index: usize, dealt: DealtCard) {
        self.events.push(DealEvent::Placed {
            seat,
            index,
            card: dealt.card,
            revealed: dealt.revealed,
        });
    }

    pub(crate) fn revealed(&mut self, seat: Seat, index: usize, card: Card) {
        self.events.push(DealEvent::Revealed { seat, index, card });
    }

    fn reset_deck(&mut self) {
        self.deck.reset(self.catalog);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum ResolutionDetail {
    Blackjack {
        outcome: BlackjackOutcome,
        player: HandValue,
        dealer: HandValue,
    },
    Poker {
        category: Option<Category>,
    },
}

/// Outcome of a finished round, as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub label: &'static str,
    pub wager: u64,
    pub payout: u64,
    pub detail: ResolutionDetail,
}

impl Resolution {
    pub fn is_win(&self) -> bool {
        self.payout > 0
    }
}

pub const NO_WIN: &str = "NO WIN";

/// Per-game round state. The table delegates step entry and action
/// availability here.
#[derive(Debug, Clone)]
pub enum Variant {
    Blackjack(BlackjackRound),
    Poker(PokerRound),
}

impl Variant {
    pub fn blackjack(win_rule: WinRule) -> Self {
        Variant::Blackjack(BlackjackRound::new(win_rule))
    }

    pub fn poker(pay_table: PayTable) -> Self {
        Variant::Poker(PokerRound::new(pay_table))
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Variant::Blackjack(_) => GameKind::Blackjack,
            Variant::Poker(_) => GameKind::Poker,
        }
    }

    pub fn valid_actions(&self, step: GameStep) -> &'static [ActionKind] {
        match (self, step) {
            (_, GameStep::Standby | GameStep::Finished) => {
                &[ActionKind::AdjustBet, ActionKind::Deal, ActionKind::SwitchGame]
            }
            (_, GameStep::DealerTurn) => &[],
            (Variant::Blackjack(_), GameStep::PlayerTurn) => &[ActionKind::Hit, ActionKind::Stand],
            (Variant::Poker(_), GameStep::PlayerTurn) => &[ActionKind::ToggleHold, ActionKind::Draw],
        }
    }

    fn dealt_count(&self) -> usize {
        match self {
            Variant::Blackjack(r) => r.dealt_count(),
            Variant::Poker(r) => r.dealt_count(),
        }
    }

    fn on_enter(
        &mut self,
        step: GameStep,
        wager: u64,
        ctx: &mut RoundContext<'_>,
    ) -> Result<Option<Resolution>, GameError> {
        match step {
            GameStep::Standby => {
                match self {
                    Variant::Blackjack(r) => r.clear(),
                    Variant::Poker(r) => r.clear(),
                }
                ctx.reset_deck();
                Ok(None)
            }
            GameStep::DealerTurn => {
                match self {
                    Variant::Blackjack(r) => r.deal_initial(ctx)?,
                    Variant::Poker(r) => r.fill_river(ctx)?,
                }
                Ok(None)
            }
            GameStep::PlayerTurn => {
                if let Variant::Poker(r) = self {
                    r.refresh_preview();
                }
                Ok(None)
            }
            GameStep::Finished => self.resolve(wager, ctx).map(Some),
        }
    }

    fn resolve(&mut self, wager: u64, ctx: &mut RoundContext<'_>) -> Result<Resolution, GameError> {
        match self {
            Variant::Blackjack(r) => {
                let outcome = r.finish(ctx)?;
                let payout = if outcome.player_wins() { wager * 2 } else { 0 };
                Ok(Resolution {
                    label: outcome.label(),
                    wager,
                    payout,
                    detail: ResolutionDetail::Blackjack {
                        outcome,
                        player: r.player().value(),
                        dealer: r.dealer().value(),
                    },
                })
            }
            Variant::Poker(r) => {
                let category = r.evaluate();
                Ok(Resolution {
                    label: category.map_or(NO_WIN, Category::label),
                    wager,
                    payout: r.pay_table().payout(category, wager),
                    detail: ResolutionDetail::Poker { category },
                })
            }
        }
    }
}

/// One seat at a game table: variant state, deck, bet and event queue.
///
/// # Examples
///
/// ```
/// use casino_engine::catalog::Catalog;
/// use casino_engine::game::{CasinoTable, GameStep, Variant};
/// use casino_engine::ledger::{Account, Ledger};
/// use casino_engine::poker::PayTable;
/// use casino_engine::rules::TableRules;
///
/// let catalog = Catalog::standard();
/// let mut account = Account::default();
/// let mut table = CasinoTable::new(Variant::poker(PayTable::default()), TableRules::default(), 7, &catalog);
///
/// table.deal(&catalog, &mut account).unwrap();
/// assert_eq!(table.step(), GameStep::PlayerTurn);
/// table.toggle_hold(0).unwrap();
/// let resolution = table.draw(&catalog, &mut account).unwrap();
/// assert_eq!(table.step(), GameStep::Finished);
/// assert_eq!(account.balance(), 10_000 - 50 + resolution.payout);
/// ```
#[derive(Debug)]
pub struct CasinoTable {
    variant: Variant,
    step: GameStep,
    deck: WeightedDeck,
    rules: TableRules,
    bet: u32,
    wager: u64,
    last: Option<Resolution>,
    events: Vec<DealEvent>,
}

impl CasinoTable {
    pub fn new(variant: Variant, rules: TableRules, seed: u64, catalog: &Catalog) -> Self {
        let mut deck = WeightedDeck::new_with_seed(seed);
        deck.reset(catalog);
        Self {
            variant,
            step: GameStep::Standby,
            deck,
            rules,
            bet: 1,
            wager: 0,
            last: None,
            events: Vec::new(),
        }
    }

    pub fn kind(&self) -> GameKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn step(&self) -> GameStep {
        self.step
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    /// Credits committed to the round in progress.
    pub fn wager(&self) -> u64 {
        self.wager
    }

    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last.as_ref()
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Cards dealt this round, including poker discards.
    pub fn dealt_count(&self) -> usize {
        self.variant.dealt_count()
    }

    pub fn valid_actions(&self) -> &'static [ActionKind] {
        self.variant.valid_actions(self.step)
    }

    /// True between a committed deal and its resolution.
    pub fn in_progress(&self) -> bool {
        matches!(self.step, GameStep::DealerTurn | GameStep::PlayerTurn)
    }

    pub fn drain_events(&mut self) -> Vec<DealEvent> {
        std::mem::take(&mut self.events)
    }

    /// Discards round state and returns to Standby with a full deck.
    /// Nothing is refunded; the catalog is untouched.
    pub fn reset_round(&mut self, catalog: &Catalog) {
        self.wager = 0;
        self.events.clear();
        self.enter_standby(catalog);
    }

    /// Replaces the variant. Only allowed while no round is in progress.
    pub fn switch_variant(&mut self, variant: Variant, catalog: &Catalog) -> Result<(), GameError> {
        self.ensure(ActionKind::SwitchGame)?;
        tracing::debug!(from = ?self.variant.kind(), to = ?variant.kind(), "switching game");
        self.variant = variant;
        self.last = None;
        self.reset_round(catalog);
        Ok(())
    }

    pub fn adjust_bet(&mut self, change: BetChange, balance: u64) -> Result<u32, GameError> {
        self.ensure(ActionKind::AdjustBet)?;
        self.bet = adjust_bet(self.bet, change, &self.rules, balance)?;
        Ok(self.bet)
    }

    /// Commits the bet and deals the opening cards, leaving the table in
    /// PlayerTurn.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidStateTransition`] outside Standby/Finished
    /// - [`GameError::InvalidBet`] when the wager cannot be debited
    /// - [`GameError::EmptyDeck`] when the deal runs dry; the wager is
    ///   refunded and the table is back in Standby
    pub fn deal(&mut self, catalog: &Catalog, ledger: &mut dyn Ledger) -> Result<(), GameError> {
        self.ensure(ActionKind::Deal)?;
        let balance = ledger.balance();
        let wager = validate_bet(self.bet, &self.rules, balance)?;
        if !ledger.try_debit(wager) {
            return Err(GameError::InvalidBet {
                bet: self.bet,
                max_bet: self.rules.max_bet,
                balance,
            });
        }
        self.wager = wager;
        self.last = None;
        self.events.clear();
        self.enter_standby(catalog);
        let result = self
            .enter(GameStep::DealerTurn, catalog)
            .and_then(|_| self.enter(GameStep::PlayerTurn, catalog));
        self.settle(result, catalog, ledger).map(|_| ())
    }

    /// Deals one card to the blackjack player. Returns the resolution when
    /// the hit busts the hand.
    pub fn hit(
        &mut self,
        catalog: &Catalog,
        ledger: &mut dyn Ledger,
    ) -> Result<Option<Resolution>, GameError> {
        self.ensure(ActionKind::Hit)?;
        let result = self.hit_inner(catalog);
        self.settle(result, catalog, ledger)
    }

    pub fn stand(&mut self, catalog: &Catalog, ledger: &mut dyn Ledger) -> Result<Resolution, GameError> {
        self.ensure(ActionKind::Stand)?;
        let result = self.enter(GameStep::Finished, catalog);
        self.settle_final(result, ActionKind::Stand, catalog, ledger)
    }

    /// Flips the hold flag of a river slot and returns the new flag.
    pub fn toggle_hold(&mut self, slot: usize) -> Result<bool, GameError> {
        self.ensure(ActionKind::ToggleHold)?;
        let step = self.step;
        match &mut self.variant {
            Variant::Poker(round) => round.toggle_hold(slot),
            Variant::Blackjack(_) => Err(GameError::InvalidStateTransition {
                step,
                action: ActionKind::ToggleHold,
            }),
        }
    }

    /// Replaces unheld poker slots and resolves the round.
    pub fn draw(&mut self, catalog: &Catalog, ledger: &mut dyn Ledger) -> Result<Resolution, GameError> {
        self.ensure(ActionKind::Draw)?;
        let result = self.draw_inner(catalog);
        self.settle_final(result, ActionKind::Draw, catalog, ledger)
    }

    /// Dispatches any [`Action`]; returns a resolution when the action ended
    /// the round.
    pub fn apply(
        &mut self,
        action: Action,
        catalog: &Catalog,
        ledger: &mut dyn Ledger,
    ) -> Result<Option<Resolution>, GameError> {
        match action {
            Action::AdjustBet(change) => self.adjust_bet(change, ledger.balance()).map(|_| None),
            Action::Deal => self.deal(catalog, ledger).map(|_| None),
            Action::Hit => self.hit(catalog, ledger),
            Action::Stand => self.stand(catalog, ledger).map(Some),
            Action::ToggleHold(slot) => self.toggle_hold(slot).map(|_| None),
            Action::Draw => self.draw(catalog, ledger).map(Some),
        }
    }

    pub fn snapshot(&self, balance: u64) -> Snapshot {
        let mut snap = Snapshot {
            game: self.kind(),
            step: self.step,
            bet: self.bet,
            wager: self.wager,
            balance,
            player: Vec::new(),
            dealer: Vec::new(),
            river: Vec::new(),
            held: Vec::new(),
            player_value: None,
            dealer_value: None,
            preview: None,
            last_resolution: self.last.clone(),
            valid_actions: self.valid_actions().to_vec(),
            deck_remaining: self.deck.remaining(),
        };
        match &self.variant {
            Variant::Blackjack(r) => {
                snap.player = r.player().cards().iter().map(CardView::from).collect();
                snap.dealer = r.dealer().cards().iter().map(CardView::from).collect();
                if !r.player().is_empty() {
                    snap.player_value = Some(r.player().value());
                    snap.dealer_value = Some(r.dealer().visible_value());
                }
            }
            Variant::Poker(r) => {
                snap.river = r.river().iter().flatten().map(CardView::from).collect();
                snap.held = r.held().to_vec();
                if self.step == GameStep::PlayerTurn {
                    snap.preview = r.preview();
                }
            }
        }
        snap
    }

    fn hit_inner(&mut self, catalog: &Catalog) -> Result<Option<Resolution>, GameError> {
        let step = self.step;
        let Variant::Blackjack(round) = &mut self.variant else {
            return Err(GameError::InvalidStateTransition {
                step,
                action: ActionKind::Hit,
            });
        };
        let mut ctx = RoundContext::new(&mut self.deck, catalog, &mut self.events);
        if round.hit(&mut ctx)? {
            self.enter(GameStep::Finished, catalog)
        } else {
            Ok(None)
        }
    }

    fn draw_inner(&mut self, catalog: &Catalog) -> Result<Option<Resolution>, GameError> {
        let step = self.step;
        let Variant::Poker(round) = &mut self.variant else {
            return Err(GameError::InvalidStateTransition {
                step,
                action: ActionKind::Draw,
            });
        };
        let mut ctx = RoundContext::new(&mut self.deck, catalog, &mut self.events);
        round.draw_unheld(&mut ctx)?;
        self.enter(GameStep::Finished, catalog)
    }

    fn ensure(&self, action: ActionKind) -> Result<(), GameError> {
        if self.valid_actions().contains(&action) {
            Ok(())
        } else {
            tracing::debug!(step = ?self.step, ?action, "action rejected");
            Err(self.rejection(action))
        }
    }

    fn rejection(&self, action: ActionKind) -> GameError {
        GameError::InvalidStateTransition {
            step: self.step,
            action,
        }
    }

    fn enter(&mut self, step: GameStep, catalog: &Catalog) -> Result<Option<Resolution>, GameError> {
        tracing::debug!(game = ?self.variant.kind(), from = ?self.step, to = ?step, "step transition");
        self.step = step;
        let mut ctx = RoundContext::new(&mut self.deck, catalog, &mut self.events);
        self.variant.on_enter(step, self.wager, &mut ctx)
    }

    fn enter_standby(&mut self, catalog: &Catalog) {
        self.step = GameStep::Standby;
        let mut ctx = RoundContext::new(&mut self.deck, catalog, &mut self.events);
        // entering Standby only clears state and cannot fail
        let _ = self.variant.on_enter(GameStep::Standby, 0, &mut ctx);
    }

    /// Pays out a resolution or unwinds an aborted round.
    fn settle(
        &mut self,
        result: Result<Option<Resolution>, GameError>,
        catalog: &Catalog,
        ledger: &mut dyn Ledger,
    ) -> Result<Option<Resolution>, GameError> {
        match result {
            Ok(Some(resolution)) => {
                ledger.credit(resolution.payout, false);
                tracing::info!(
                    game = ?self.variant.kind(),
                    label = resolution.label,
                    wager = resolution.wager,
                    payout = resolution.payout,
                    "round resolved"
                );
                self.last = Some(resolution.clone());
                Ok(Some(resolution))
            }
            Ok(None) => Ok(None),
            Err(e) if e.aborts_round() => {
                tracing::warn!(error = %e, refund = self.wager, "round aborted");
                ledger.credit(self.wager, false);
                self.wager = 0;
                self.enter_standby(catalog);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Like `settle`, for actions that must end the round.
    fn settle_final(
        &mut self,
        result: Result<Option<Resolution>, GameError>,
        action: ActionKind,
        catalog: &Catalog,
        ledger: &mut dyn Ledger,
    ) -> Result<Resolution, GameError> {
        let step = self.step;
        self.settle(result, catalog, ledger)?
            .ok_or(GameError::InvalidStateTransition { step, action })
    }
}

/// A card as the presentation layer sees it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct CardView {
    pub rank: Rank,
    pub suit: Suit,
    pub revealed: bool,
}

impl From<&DealtCard> for CardView {
    fn from(dc: &DealtCard) -> Self {
        Self {
            rank: dc.card.rank,
            suit: dc.card.suit,
            revealed: dc.revealed,
        }
    }
}

impl CardView {
    pub fn card(&self) -> Card {
        Card::new(self.rank, self.suit)
    }
}

/// Read-only view of a table for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub game: GameKind,
    pub step: GameStep,
    pub bet: u32,
    pub wager: u64,
    pub balance: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub player: Vec<CardView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dealer: Vec<CardView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub river: Vec<CardView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub held: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_value: Option<HandValue>,
    /// Counts only face-up dealer cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_value: Option<HandValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Category>,
    pub last_resolution: Option<Resolution>,
    pub valid_actions: Vec<ActionKind>,
    pub deck_remaining: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Account;

    fn blackjack_table(catalog: &Catalog, seed: u64) -> CasinoTable {
        CasinoTable::new(Variant::blackjack(WinRule::Lower), TableRules::default(), seed, catalog)
    }

    #[test]
    fn new_table_waits_in_standby_with_full_deck() {
        let catalog = Catalog::standard();
        let table = blackjack_table(&catalog, 1);
        assert_eq!(table.step(), GameStep::Standby);
        assert_eq!(table.deck_remaining(), 52);
        assert_eq!(
            table.valid_actions(),
            &[ActionKind::AdjustBet, ActionKind::Deal, ActionKind::SwitchGame]
        );
    }

    #[test]
    fn blackjack_deal_places_four_cards_dealer_first() {
        let catalog = Catalog::standard();
        let mut acct = Account::default();
        let mut table = blackjack_table(&catalog, 3);
        table.deal(&catalog, &mut acct).unwrap();
        assert_eq!(table.step(), GameStep::PlayerTurn);
        assert_eq!(acct.balance(), 10_000 - 50);

        let events = table.drain_events();
        let seats: Vec<_> = events.iter().map(DealEvent::seat).collect();
        assert_eq!(seats, vec![Seat::Dealer, Seat::Player, Seat::Dealer, Seat::Player]);
        assert!(matches!(events[0], DealEvent::Placed { revealed: false, .. }));
        assert!(matches!(events[2], DealEvent::Placed { revealed: true, .. }));
        assert_eq!(table.deck_remaining() + table.dealt_count(), 52);
        assert!(table.drain_events().is_empty());
    }

    #[test]
    fn hit_is_rejected_outside_player_turn() {
        let catalog = Catalog::standard();
        let mut acct = Account::default();
        let mut table = blackjack_table(&catalog, 3);
        let before = table.snapshot(acct.balance());
        let err = table.hit(&catalog, &mut acct).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidStateTransition {
                step: GameStep::Standby,
                action: ActionKind::Hit
            }
        );
        assert_eq!(table.snapshot(acct.balance()), before);
    }

    #[test]
    fn poker_actions_are_rejected_on_blackjack_table() {
        let catalog = Catalog::standard();
        let mut acct = Account::default();
        let mut table = blackjack_table(&catalog, 3);
        table.deal(&catalog, &mut acct).unwrap();
        assert!(matches!(
            table.toggle_hold(0),
            Err(GameError::InvalidStateTransition { .. })
        ));
        assert!(matches!(
            table.draw(&catalog, &mut acct),
            Err(GameError::InvalidStateTransition { .. })
        ));
        assert_eq!(table.step(), GameStep::PlayerTurn);
    }

    #[test]
    fn unresolved_final_action_names_its_caller() {
        let catalog = Catalog::standard();
        let mut acct = Account::default();
        let mut table = CasinoTable::new(
            Variant::poker(PayTable::default()),
            TableRules::default(),
            2,
            &catalog,
        );
        let err = table
            .settle_final(Ok(None), ActionKind::Draw, &catalog, &mut acct)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidStateTransition {
                step: GameStep::Standby,
                action: ActionKind::Draw
            }
        );
    }

    #[test]
    fn stand_resolves_and_rearms() {
        let catalog = Catalog::standard();
        let mut acct = Account::default();
        let mut table = blackjack_table(&catalog, 11);
        table.deal(&catalog, &mut acct).unwrap();
        let res = table.stand(&catalog, &mut acct).unwrap();
        assert_eq!(table.step(), GameStep::Finished);
        assert_eq!(table.last_resolution(), Some(&res));
        assert_eq!(acct.balance(), 10_000 - 50 + res.payout);
        assert!(res.payout == 0 || res.payout == 100);
        // dealer hole card is face up after resolution
        if let Variant::Blackjack(round) = table.variant() {
            assert!(round.dealer().cards().iter().all(|dc| dc.revealed));
        }
        assert!(table.valid_actions().contains(&ActionKind::Deal));
        table.deal(&catalog, &mut acct).unwrap();
        assert_eq!(table.last_resolution(), None);
        assert_eq!(table.deck_remaining() + table.dealt_count(), 52);
    }

    #[test]
    fn switching_games_mid_round_is_rejected() {
        let catalog = Catalog::standard();
        let mut acct = Account::default();
        let mut table = blackjack_table(&catalog, 5);
        table.deal(&catalog, &mut acct).unwrap();
        assert!(table
            .switch_variant(Variant::poker(PayTable::default()), &catalog)
            .is_err());
        table.stand(&catalog, &mut acct).unwrap();
        table
            .switch_variant(Variant::poker(PayTable::default()), &catalog)
            .unwrap();
        assert_eq!(table.kind(), GameKind::Poker);
        assert_eq!(table.step(), GameStep::Standby);
    }

    #[test]
    fn empty_deck_mid_deal_refunds_and_returns_to_standby() {
        let mut catalog = Catalog::standard();
        catalog.set_all_weights(Perspective::Player, 0);
        let mut acct = Account::default();
        let mut table = blackjack_table(&catalog, 5);
        let err = table.deal(&catalog, &mut acct).unwrap_err();
        assert_eq!(
            err,
            GameError::EmptyDeck {
                perspective: Perspective::Player
            }
        );
        assert_eq!(table.step(), GameStep::Standby);
        assert_eq!(table.wager(), 0);
        assert_eq!(table.deck_remaining(), 52);
        assert_eq!(acct.balance(), 10_000);
    }
}
