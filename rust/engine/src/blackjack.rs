//! Blackjack scoring and round logic.
//!
//! Hands carry a running `(min, max)` pair: an Ace adds 1 to `min` and 11 to
//! `max`, ten and face cards add 10 to both, everything else its pip value.
//! The pair is updated per card and never recomputed.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DealtCard, Rank};
use crate::catalog::Perspective;
use crate::errors::GameError;
use crate::game::{RoundContext, Seat};

pub const BLACKJACK: u32 = 21;

/// Running low/high value of a hand.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    pub min: u32,
    pub max: u32,
}

impl HandValue {
    /// Folds `ranks` into a value one card at a time.
    pub fn of(ranks: &[Rank]) -> Self {
        let mut v = HandValue::default();
        for &r in ranks {
            v.add(r);
        }
        v
    }

    pub fn add(&mut self, rank: Rank) {
        let (lo, hi) = card_points(rank);
        self.min += lo;
        self.max += hi;
    }

    /// Bust only when both interpretations exceed 21.
    pub fn is_bust(&self) -> bool {
        self.min > BLACKJACK && self.max > BLACKJACK
    }

    /// Value used at resolution: `max` unless it is over 21.
    pub fn effective(&self) -> u32 {
        if self.max <= BLACKJACK {
            self.max
        } else {
            self.min
        }
    }
}

fn card_points(rank: Rank) -> (u32, u32) {
    match rank {
        Rank::Ace => (1, 11),
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => (10, 10),
        r => {
            let v = u32::from(r.value());
            (v, v)
        }
    }
}

/// Dealer stand policy, checked before every extra dealer card.
pub fn dealer_should_draw(dealer: HandValue) -> bool {
    let stands = (14..BLACKJACK).contains(&dealer.min) || dealer.max >= 14;
    dealer.max < 18 && !stands
}

/// Which effective value wins a showdown. Ties always go to the dealer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinRule {
    /// Player wins with the strictly lower effective value.
    #[default]
    Lower,
    /// Player wins with the strictly higher effective value.
    Higher,
}

impl WinRule {
    pub fn player_wins(self, player_effective: u32, dealer_effective: u32) -> bool {
        match self {
            WinRule::Lower => player_effective < dealer_effective,
            WinRule::Higher => player_effective > dealer_effective,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlackjackOutcome {
    PlayerBust,
    DealerBust,
    PlayerWon,
    DealerWon,
}

impl BlackjackOutcome {
    pub fn label(self) -> &'static str {
        match self {
            BlackjackOutcome::PlayerBust => "PLAYER BUST",
            BlackjackOutcome::DealerBust => "DEALER BUST",
            BlackjackOutcome::PlayerWon => "PLAYER WON",
            BlackjackOutcome::DealerWon => "DEALER WON",
        }
    }

    pub fn player_wins(self) -> bool {
        matches!(self, BlackjackOutcome::DealerBust | BlackjackOutcome::PlayerWon)
    }
}

/// Resolves two finished hands.
///
/// # Examples
///
/// ```
/// use casino_engine::blackjack::{resolve, BlackjackOutcome, HandValue, WinRule};
/// use casino_engine::cards::Rank;
///
/// let player = HandValue::of(&[Rank::Ten, Rank::Seven]);
/// let dealer = HandValue::of(&[Rank::Ten, Rank::Nine]);
/// assert_eq!(resolve(player, dealer, WinRule::Lower), BlackjackOutcome::PlayerWon);
/// assert_eq!(resolve(player, dealer, WinRule::Higher), BlackjackOutcome::DealerWon);
/// ```
pub fn resolve(player: HandValue, dealer: HandValue, rule: WinRule) -> BlackjackOutcome {
    if player.is_bust() {
        BlackjackOutcome::PlayerBust
    } else if dealer.is_bust() {
        BlackjackOutcome::DealerBust
    } else if rule.player_wins(player.effective(), dealer.effective()) {
        BlackjackOutcome::PlayerWon
    } else {
        BlackjackOutcome::DealerWon
    }
}

/// An ordered hand with its running value.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Hand {
    cards: Vec<DealtCard>,
    value: HandValue,
}

impl Hand {
    pub fn push(&mut self, dealt: DealtCard) {
        self.value.add(dealt.card.rank);
        self.cards.push(dealt);
    }

    pub fn cards(&self) -> &[DealtCard] {
        &self.cards
    }

    pub fn value(&self) -> HandValue {
        self.value
    }

    /// Value of the face-up cards only.
    pub fn visible_value(&self) -> HandValue {
        let mut v = HandValue::default();
        for dc in self.cards.iter().filter(|dc| dc.revealed) {
            v.add(dc.card.rank);
        }
        v
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Turns the first hidden card face up and returns it.
    fn reveal_hidden(&mut self) -> Option<(usize, Card)> {
        let (idx, dc) = self
            .cards
            .iter_mut()
            .enumerate()
            .find(|(_, dc)| !dc.revealed)?;
        dc.revealed = true;
        Some((idx, dc.card))
    }
}

/// Round-scoped blackjack state.
#[derive(Debug, Clone, Default)]
pub struct BlackjackRound {
    player: Hand,
    dealer: Hand,
    win_rule: WinRule,
}

impl BlackjackRound {
    pub fn new(win_rule: WinRule) -> Self {
        Self {
            win_rule,
            ..Self::default()
        }
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    pub(crate) fn clear(&mut self) {
        self.player = Hand::default();
        self.dealer = Hand::default();
    }

    pub(crate) fn dealt_count(&self) -> usize {
        self.player.len() + self.dealer.len()
    }

    /// Four cards alternating dealer/player, dealer first; the dealer's first
    /// card stays face down.
    pub(crate) fn deal_initial(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), GameError> {
        for i in 0..4 {
            if i % 2 == 0 {
                self.deal_dealer(ctx)?;
            } else {
                self.deal_player(ctx)?;
            }
        }
        Ok(())
    }

    /// Deals one player card and reports whether the hand is now bust.
    pub(crate) fn hit(&mut self, ctx: &mut RoundContext<'_>) -> Result<bool, GameError> {
        self.deal_player(ctx)?;
        Ok(self.player.value().is_bust())
    }

    /// Reveals the hole card, plays out the dealer and resolves the round.
    pub(crate) fn finish(
        &mut self,
        ctx: &mut RoundContext<'_>,
    ) -> Result<BlackjackOutcome, GameError> {
        if let Some((idx, card)) = self.dealer.reveal_hidden() {
            ctx.revealed(Seat::Dealer, idx, card);
        }
        if !self.player.value().is_bust() {
            while dealer_should_draw(self.dealer.value()) {
                self.deal_dealer(ctx)?;
            }
        }
        let outcome = resolve(self.player.value(), self.dealer.value(), self.win_rule);
        tracing::debug!(
            player = ?self.player.value(),
            dealer = ?self.dealer.value(),
            ?outcome,
            "blackjack hands resolved"
        );
        Ok(outcome)
    }

    fn deal_player(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), GameError> {
        let card = ctx.draw(Perspective::Player)?;
        let dealt = DealtCard::face_up(card);
        ctx.placed(Seat::Player, self.player.len(), dealt);
        self.player.push(dealt);
        Ok(())
    }

    fn deal_dealer(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), GameError> {
        let card = ctx.draw(Perspective::Dealer)?;
        let dealt = if self.dealer.is_empty() {
            DealtCard::face_down(card)
        } else {
            DealtCard::face_up(card)
        };
        ctx.placed(Seat::Dealer, self.dealer.len(), dealt);
        self.dealer.push(dealt);
        Ok(())
    }
}
